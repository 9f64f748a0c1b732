//! Field extraction from raw post text

use crate::extract::DATE_NOT_FOUND;
use once_cell::sync::Lazy;
use regex::Regex;

/// `Published <Month> <Day>, <Year>`, capturing the date part
static PUBLISHED_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Published\s+([A-Z][a-z]+\.?\s+\d{1,2},\s+\d{4})").expect("valid date regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extracts the publication date from raw (uncleaned) post text
///
/// Returns the first `Published <Month> <Day>, <Year>` match with its inner
/// whitespace normalized, or [`DATE_NOT_FOUND`] when the text has no stamp.
///
/// # Example
///
/// ```
/// use blog_ingest::extract_publication_date;
///
/// assert_eq!(extract_publication_date("Published March 3, 2024"), "March 3, 2024");
/// assert_eq!(extract_publication_date("no stamp"), "Publication date not found");
/// ```
pub fn extract_publication_date(raw: &str) -> String {
    PUBLISHED_DATE
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|date| WHITESPACE.replace_all(date.as_str(), " ").into_owned())
        .unwrap_or_else(|| DATE_NOT_FOUND.to_string())
}
