pub mod hierarchy;
pub mod logger;
