pub mod analysis;
pub mod details;
pub mod list;
pub mod tree;
