//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the PostStore trait.

use crate::extract::{CONTENT_NOT_FOUND, TITLE_NOT_FOUND};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{PostStore, StorageResult};
use crate::storage::{NewPost, StoredPost};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqlitePostStore {
    conn: Connection,
}

impl SqlitePostStore {
    /// Opens or creates the database at `path`
    ///
    /// The connection lives as long as the store and is closed when it drops.
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl PostStore for SqlitePostStore {
    fn exists(&self, title: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM posts WHERE title = ?1 LIMIT 1",
                params![title],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn insert_if_new(&mut self, post: &NewPost) -> StorageResult<bool> {
        if post.title == TITLE_NOT_FOUND || post.content == CONTENT_NOT_FOUND {
            return Ok(false);
        }

        // Check and insert in one statement so no writer can slip in between.
        let inserted = self.conn.execute(
            "INSERT INTO posts (title, date, content, url, scraping_date)
             SELECT ?1, ?2, ?3, ?4, ?5
             WHERE NOT EXISTS (SELECT 1 FROM posts WHERE title = ?1)",
            params![
                post.title,
                post.date,
                post.content,
                post.url,
                post.scraping_date
            ],
        )?;

        Ok(inserted == 1)
    }

    fn get_post_by_title(&self, title: &str) -> StorageResult<Option<StoredPost>> {
        let post = self
            .conn
            .query_row(
                "SELECT id, title, date, content, url, scraping_date
                 FROM posts WHERE title = ?1 ORDER BY id LIMIT 1",
                params![title],
                |row| {
                    Ok(StoredPost {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        date: row.get(2)?,
                        content: row.get(3)?,
                        url: row.get(4)?,
                        scraping_date: row.get(5)?,
                    })
                },
            )
            .optional()?;

        Ok(post)
    }

    fn count_posts(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn latest_scraping_date(&self) -> StorageResult<Option<String>> {
        let latest: Option<String> = self.conn.query_row(
            "SELECT MAX(scraping_date) FROM posts",
            [],
            |row| row.get(0),
        )?;
        Ok(latest)
    }
}
