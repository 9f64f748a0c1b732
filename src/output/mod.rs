//! Output module for run reporting
//!
//! This module handles:
//! - The durable error log that accumulates recoverable failures across runs
//! - Store statistics for the `--stats` mode

mod error_log;
pub mod stats;

pub use error_log::{ErrorLog, LogEntry, LogLevel};
pub use stats::{load_statistics, print_statistics, StoreStatistics};
