//! Database schema definitions
//!
//! The `posts` table is shared with the downstream summarizer, which joins on
//! `title` and reads `scraping_date`; its shape must stay stable.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Ingested posts
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY,
    title TEXT,
    date TEXT,
    content TEXT,
    url TEXT,
    scraping_date TEXT
);

CREATE INDEX IF NOT EXISTS idx_posts_title ON posts(title);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
