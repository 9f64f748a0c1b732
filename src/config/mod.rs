//! Configuration module for Blog-Ingest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a run needs no file at all; the file and the
//! command line only override what differs from the Hugging Face blog defaults.
//!
//! # Example
//!
//! ```no_run
//! use blog_ingest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ingest.toml")).unwrap();
//! println!("Listing page: {}", config.source.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserConfig, Config, OutputConfig, SourceConfig, Timeouts};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
