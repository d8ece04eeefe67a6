pub mod local;
pub mod snapshot;
pub mod traits;
