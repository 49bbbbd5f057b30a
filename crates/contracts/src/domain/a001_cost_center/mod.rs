pub mod aggregate;
pub mod analysis;
pub mod tree;
pub mod references;
