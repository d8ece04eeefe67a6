pub mod group;
pub mod holding;
pub mod rent;
