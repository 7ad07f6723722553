pub mod config;
pub mod stats;
pub mod streak;
pub mod task;
pub mod timer;
