//! Boilerplate removal and whitespace normalization for post content

use once_cell::sync::Lazy;
use regex::Regex;

/// Page furniture removed from post bodies
static BOILERPLATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // navigation link back to the listing
        r"(?i)back\s+to\s+articles",
        // publication stamp
        r"Published\s+[A-Z][a-z]+\.?\s+\d{1,2},\s+\d{4}",
        // source link
        r"(?i)update\s+on\s+github",
        // vote counter
        r"Upvote\s+\d+",
        // author handle lines
        r"(?m)^[ \t]*@[\w.-]+(?:[ \t]+[\w.-]+){0,3}[ \t]*$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid boilerplate regex"))
    .collect()
});

static HORIZONTAL_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));
static SPACE_AROUND_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ?\n ?").expect("valid regex"));
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Cleans raw post content
///
/// Removes navigation, publication stamp, source link, vote counter and byline
/// boilerplate, then collapses horizontal whitespace to single spaces and
/// blank-line runs to a single blank line, and trims the result.
///
/// Passes repeat until nothing changes, so cleaning is idempotent even when a
/// removal joins two fragments into a new match.
///
/// # Example
///
/// ```
/// use blog_ingest::clean_content;
///
/// let raw = "Back to Articles\nPublished March 3, 2024\n\n\n\nHello   world";
/// assert_eq!(clean_content(raw), "Hello world");
/// assert_eq!(clean_content(&clean_content(raw)), clean_content(raw));
/// ```
pub fn clean_content(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let mut cleaned = text.to_string();
    for pattern in BOILERPLATE.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }

    let cleaned = HORIZONTAL_SPACE.replace_all(&cleaned, " ");
    let cleaned = SPACE_AROUND_NEWLINE.replace_all(&cleaned, "\n");
    let cleaned = BLANK_LINES.replace_all(&cleaned, "\n\n");
    cleaned.trim().to_string()
}
