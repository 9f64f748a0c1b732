//! Blog-Ingest: a single-site article ingester
//!
//! This crate discovers post links on a blog listing page, renders each post,
//! extracts and cleans its content, and stores new posts in SQLite for
//! downstream summarization and serving.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod render;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Blog-Ingest operations
///
/// Only conditions that abort a whole run surface through this type; per-link
/// failures are logged and absorbed by the coordinator.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering error: {0}")]
    Render(#[from] render::RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Blog-Ingest operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_ingest, Coordinator, LinkState, RunSummary};
pub use extract::{clean_content, extract_publication_date, RawPost};
pub use storage::{NewPost, PostStore, SqlitePostStore};
