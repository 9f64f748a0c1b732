//! Extraction of post records from rendered pages
//!
//! This module contains:
//! - Link discovery on the listing page
//! - Post rendering and DOM text reconstruction
//! - Publication date extraction from raw post text
//! - Boilerplate cleaning of post content

mod cleaner;
mod fields;
mod links;
mod post;

pub use cleaner::clean_content;
pub use fields::extract_publication_date;
pub use links::discover_links;
pub use post::{collect_text, extract_post};

/// Placeholder title used when a page has no heading
pub const TITLE_NOT_FOUND: &str = "Title not found";

/// Placeholder content used when the content container is missing
pub const CONTENT_NOT_FOUND: &str = "Blog content not found";

/// Placeholder date used when no publication stamp is found
pub const DATE_NOT_FOUND: &str = "Publication date not found";

/// A post as extracted from its page, before cleaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub title: String,
    pub content: String,
    pub publication_date: String,
}

impl RawPost {
    /// Returns true if no title was found
    pub fn is_missing_title(&self) -> bool {
        self.title == TITLE_NOT_FOUND
    }

    /// Returns true if no content was found
    pub fn is_missing_content(&self) -> bool {
        self.content == CONTENT_NOT_FOUND
    }
}
