pub mod aggregate;
pub mod inventory;
pub mod list;
