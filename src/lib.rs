pub mod config;
pub mod fleet;
pub mod inventory;
pub mod version;
