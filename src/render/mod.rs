//! Rendering sessions for loading pages and querying their DOM
//!
//! The rest of the crate only sees the [`Renderer`] / [`RenderSession`]
//! capability:
//! - `navigate` loads a page (bounded by a navigation timeout)
//! - `wait_for_selector` waits for a DOM region (bounded by a selector timeout)
//! - `query_selector` / `query_selector_all` query the loaded document
//!
//! A session is owned by exactly one caller and is released when it is
//! dropped, so every exit path (including `?` on an error) closes it.
//!
//! Two implementations exist: [`HttpRenderer`] fetches pages over HTTP and
//! parses them with `scraper`, and [`MemoryRenderer`] serves pre-loaded
//! documents keyed by URL for offline runs and tests.

mod dom;
mod http;
mod memory;

pub use dom::{element_display, Display, DomNode, HtmlNode};
pub use http::{HttpRenderer, HttpSession};
pub use memory::{MemoryRenderer, MemorySession};

use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by rendering sessions
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Navigation timeout for {url}")]
    NavigationTimeout { url: String },

    #[error("Navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Timed out waiting for selector '{selector}'")]
    SelectorTimeout { selector: String },

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("No document loaded; navigate first")]
    NoDocument,

    #[error("Failed to start rendering session: {0}")]
    SessionStartup(String),
}

impl RenderError {
    /// Returns true for failures to load the page at all
    pub fn is_navigation(&self) -> bool {
        matches!(self, Self::NavigationTimeout { .. } | Self::Navigation { .. })
    }

    /// Returns true when a selector never appeared
    pub fn is_selector_timeout(&self) -> bool {
        matches!(self, Self::SelectorTimeout { .. })
    }
}

/// Launches rendering sessions
pub trait Renderer {
    type Session: RenderSession;

    /// Opens a fresh session with no page loaded
    fn open_session(&self) -> Result<Self::Session, RenderError>;
}

/// A single page-loading context, exclusively owned by its user
#[allow(async_fn_in_trait)]
pub trait RenderSession {
    /// Loads `url`, replacing any previously loaded document
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError>;

    /// Waits until `selector` matches at least one element of the loaded page
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), RenderError>;

    /// The currently loaded document
    fn document(&self) -> Result<&Document, RenderError>;

    /// First element matching `selector`, if any
    fn query_selector(&self, selector: &str) -> Result<Option<ElementRef<'_>>, RenderError> {
        self.document()?.query_selector(selector)
    }

    /// All elements matching `selector`, in document order
    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, RenderError> {
        self.document()?.query_selector_all(selector)
    }

    /// Closes the session
    ///
    /// Dropping a session closes it too; this only makes the normal path explicit.
    fn close(self)
    where
        Self: Sized,
    {
        drop(self);
    }
}

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// First element matching `selector`, if any
    pub fn query_selector(&self, selector: &str) -> Result<Option<ElementRef<'_>>, RenderError> {
        let parsed = parse_selector(selector)?;
        Ok(self.html.select(&parsed).next())
    }

    /// All elements matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, RenderError> {
        let parsed = parse_selector(selector)?;
        Ok(self.html.select(&parsed).collect())
    }

    /// Returns true if `selector` matches anything
    pub fn contains(&self, selector: &str) -> Result<bool, RenderError> {
        Ok(self.query_selector(selector)?.is_some())
    }
}

/// Parses a CSS selector, mapping failures into [`RenderError::InvalidSelector`]
pub fn parse_selector(selector: &str) -> Result<Selector, RenderError> {
    Selector::parse(selector).map_err(|e| RenderError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// First anchor inside `element` (or `element` itself when it is an anchor)
/// that carries a non-empty `href`
pub fn first_anchor_href(element: ElementRef<'_>) -> Result<Option<String>, RenderError> {
    if element.value().name() == "a" {
        if let Some(href) = element.value().attr("href").map(str::trim) {
            if !href.is_empty() {
                return Ok(Some(href.to_string()));
            }
        }
    }

    let anchor = parse_selector("a[href]")?;
    Ok(element
        .select(&anchor)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_queries() {
        let doc = Document::parse(
            r#"<html><body><div class="a">one</div><div class="a">two</div></body></html>"#,
        );

        let first = doc.query_selector("div.a").unwrap().unwrap();
        assert_eq!(first.text().collect::<String>(), "one");
        assert_eq!(doc.query_selector_all("div.a").unwrap().len(), 2);
        assert!(doc.query_selector("span").unwrap().is_none());
        assert!(!doc.contains("span").unwrap());
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse("<html></html>");
        let err = doc.query_selector("div[[").unwrap_err();
        assert!(matches!(err, RenderError::InvalidSelector { .. }));
    }

    #[test]
    fn test_first_anchor_href() {
        let doc = Document::parse(
            r#"<div id="card"><span>x</span><a href="">empty</a><a href=" /blog/post ">Post</a></div>
               <a id="direct" href="/blog/direct">Direct</a>"#,
        );

        let card = doc.query_selector("#card").unwrap().unwrap();
        assert_eq!(
            first_anchor_href(card).unwrap(),
            Some("/blog/post".to_string())
        );

        let direct = doc.query_selector("#direct").unwrap().unwrap();
        assert_eq!(
            first_anchor_href(direct).unwrap(),
            Some("/blog/direct".to_string())
        );
    }

    #[test]
    fn test_error_kinds() {
        let timeout = RenderError::NavigationTimeout {
            url: "https://example.com".to_string(),
        };
        let missing = RenderError::SelectorTimeout {
            selector: "h1".to_string(),
        };

        assert!(timeout.is_navigation());
        assert!(!timeout.is_selector_timeout());
        assert!(missing.is_selector_timeout());
        assert!(!missing.is_navigation());
    }
}
