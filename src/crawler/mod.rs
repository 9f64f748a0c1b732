//! Crawler module for the ingestion pipeline
//!
//! This module contains the core run logic, including:
//! - Per-link state tracking
//! - Sequential link processing with failure isolation
//! - Overall run coordination

mod coordinator;
mod state;

pub use coordinator::{Coordinator, LinkPreview, RunSummary};
pub use state::LinkState;

use crate::config::Config;
use crate::output::ErrorLog;
use crate::render::HttpRenderer;
use crate::storage::open_store;
use crate::ScrapeError;
use std::path::Path;

/// Runs a complete ingestion pass
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP renderer
/// 2. Open the post store
/// 3. Open the error log
/// 4. Discover, extract, clean and store posts
///
/// # Arguments
///
/// * `config` - The ingester configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - Run finished; per-link failures are counted inside
/// * `Err(ScrapeError)` - Startup failed
pub async fn run_ingest(config: &Config) -> Result<RunSummary, ScrapeError> {
    let mut coordinator = build_coordinator(config)?;
    Ok(coordinator.run().await)
}

/// Builds a coordinator over the production renderer and SQLite store
pub fn build_coordinator(
    config: &Config,
) -> Result<Coordinator<HttpRenderer, crate::storage::SqlitePostStore>, ScrapeError> {
    let renderer = HttpRenderer::new(&config.browser)?;
    let store = open_store(Path::new(&config.output.database_path))?;
    let log = ErrorLog::open(Path::new(&config.output.error_log_path))?;

    tracing::info!(
        "Storing posts in {} (errors to {})",
        config.output.database_path,
        config.output.error_log_path
    );

    Coordinator::new(config, renderer, store, log)
}
