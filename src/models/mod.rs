pub mod config;
pub mod markers;
pub mod source;
pub mod types;
