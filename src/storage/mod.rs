//! Storage module for persisting ingested posts
//!
//! This module handles all database operations for the ingester:
//! - SQLite database initialization and schema management
//! - Title-keyed deduplication
//! - Insert-if-new of cleaned posts

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqlitePostStore;
pub use traits::{PostStore, StorageError, StorageResult};

use std::path::Path;

/// Opens (or creates) the post database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqlitePostStore)` - Successfully opened store
/// * `Err(StorageError)` - Failed to open the store; fatal for a run
pub fn open_store(path: &Path) -> StorageResult<SqlitePostStore> {
    SqlitePostStore::new(path)
}

/// A cleaned post ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub date: String,
    pub content: String,
    pub url: String,
    pub scraping_date: String,
}

/// Represents a post in the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPost {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub content: String,
    pub url: String,
    pub scraping_date: String,
}
