pub mod details;
pub mod inventory;
pub mod list;
