pub mod history;
pub mod holdings;
pub mod number;
pub mod rent;
pub mod table;
