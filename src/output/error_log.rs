//! Append-only log of recoverable failures
//!
//! Every entry is also emitted as a `tracing` event so it shows up on the
//! console alongside progress lines.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Severity of a logged failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A single logged failure
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.level,
            self.message
        )
    }
}

/// Error log for one run
///
/// Entries from this run are kept in memory; when backed by a file they are
/// also appended to it, one line each.
#[derive(Debug, Default)]
pub struct ErrorLog {
    file: Option<File>,
    entries: Vec<LogEntry>,
}

impl ErrorLog {
    /// Opens (or creates) the log file in append mode
    pub fn open(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(file),
            entries: Vec::new(),
        })
    }

    /// A log that keeps entries in memory only
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Records a recoverable failure that degraded, but did not stop, a step
    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(LogLevel::Warning, message.into());
    }

    /// Records a failure that abandoned a step
    pub fn error(&mut self, message: impl Into<String>) {
        self.record(LogLevel::Error, message.into());
    }

    /// Entries recorded during this run
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of error-level entries recorded during this run
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.level == LogLevel::Error)
            .count()
    }

    fn record(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Warning => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }

        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message,
        };

        if let Some(file) = self.file.as_mut() {
            if let Err(e) = writeln!(file, "{}", entry).and_then(|_| file.flush()) {
                tracing::warn!("Failed to write error log entry: {}", e);
            }
        }

        self.entries.push(entry);
    }
}
