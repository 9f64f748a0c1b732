//! Storage traits and error types
//!
//! This module defines the trait interface for post storage backends and
//! associated error types.

use crate::storage::{NewPost, StoredPost};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for post storage backends
///
/// The title is the deduplication key: a store never holds two posts with the
/// same title, and never holds a post whose title or content is a
/// not-found placeholder.
pub trait PostStore {
    /// Returns true if a post with exactly this title is stored
    fn exists(&self, title: &str) -> StorageResult<bool>;

    /// Stores `post` unless it is a duplicate or a placeholder
    ///
    /// The duplicate check and the insert happen atomically, and the insert
    /// is committed before this returns.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The post was inserted
    /// * `Ok(false)` - Nothing was written (duplicate title or placeholder fields)
    fn insert_if_new(&mut self, post: &NewPost) -> StorageResult<bool>;

    /// Gets a post by its title
    fn get_post_by_title(&self, title: &str) -> StorageResult<Option<StoredPost>>;

    /// Gets total post count
    fn count_posts(&self) -> StorageResult<u64>;

    /// Gets the most recent ingestion date
    fn latest_scraping_date(&self) -> StorageResult<Option<String>>;
}
