//! Statistics over the ingested posts
//!
//! This module provides functionality for extracting and displaying
//! store statistics for the `--stats` mode.

use crate::storage::PostStore;
use crate::ScrapeError;

/// Summary of the posts table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatistics {
    /// Number of stored posts
    pub total_posts: u64,

    /// Most recent ingestion date, if any post is stored
    pub latest_scraping_date: Option<String>,
}

/// Loads statistics from storage
pub fn load_statistics(store: &dyn PostStore) -> Result<StoreStatistics, ScrapeError> {
    Ok(StoreStatistics {
        total_posts: store.count_posts()?,
        latest_scraping_date: store.latest_scraping_date()?,
    })
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Ingestion Statistics ===\n");
    println!("Stored posts: {}", stats.total_posts);
    match &stats.latest_scraping_date {
        Some(date) => println!("Last ingestion: {}", date),
        None => println!("Last ingestion: never"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{NewPost, SqlitePostStore};

    #[test]
    fn test_empty_store_statistics() {
        let store = SqlitePostStore::new_in_memory().unwrap();
        let stats = load_statistics(&store).unwrap();
        assert_eq!(stats.total_posts, 0);
        assert_eq!(stats.latest_scraping_date, None);
    }

    #[test]
    fn test_statistics_after_inserts() {
        let mut store = SqlitePostStore::new_in_memory().unwrap();
        for (title, day) in [("One", "2024-03-01"), ("Two", "2024-03-04")] {
            store
                .insert_if_new(&NewPost {
                    title: title.to_string(),
                    date: "March 1, 2024".to_string(),
                    content: "Body".to_string(),
                    url: format!("https://example.com/blog/{}", title),
                    scraping_date: day.to_string(),
                })
                .unwrap();
        }

        let stats = load_statistics(&store).unwrap();
        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.latest_scraping_date, Some("2024-03-04".to_string()));
    }
}
