pub mod config;
pub mod ops;
pub mod types;
