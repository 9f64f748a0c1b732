//! Post page extraction
//!
//! Renders a single post, reads its title, and rebuilds the readable body
//! text from the content container's DOM subtree.

use crate::config::{SourceConfig, Timeouts};
use crate::extract::fields::extract_publication_date;
use crate::extract::{RawPost, CONTENT_NOT_FOUND, DATE_NOT_FOUND, TITLE_NOT_FOUND};
use crate::output::ErrorLog;
use crate::render::{Display, DomNode, HtmlNode, RenderError, RenderSession, Renderer};

/// Renders `url` and extracts its title, content, and publication date
///
/// # Field Rules
///
/// | Field | Source | Fallback |
/// |-------|--------|----------|
/// | title | first `title_selector` match, trimmed | `Title not found` |
/// | content | text walk of `content_selector` | `Blog content not found` |
/// | publication date | `Published <date>` stamp in raw content | `Publication date not found` |
///
/// A content container that never appears is logged and yields the content
/// and date fallbacks; it is not an error.
///
/// # Errors
///
/// * `RenderError::NavigationTimeout` - the page did not load in time
/// * `RenderError::Navigation` - the page failed to load
/// * `RenderError::InvalidSelector` - a configured selector does not parse
///
/// The session is closed on every path.
pub async fn extract_post<R: Renderer>(
    renderer: &R,
    url: &str,
    source: &SourceConfig,
    timeouts: Timeouts,
    log: &mut ErrorLog,
) -> Result<RawPost, RenderError> {
    let mut session = renderer.open_session()?;
    session.navigate(url, timeouts.navigation).await?;

    let content = match session
        .wait_for_selector(&source.content_selector, timeouts.selector)
        .await
    {
        Ok(()) => session
            .query_selector(&source.content_selector)?
            .map(|container| collect_text(&HtmlNode::from(container)))
            .filter(|text| !text.is_empty()),
        Err(e) if e.is_selector_timeout() => {
            log.warn(format!("Content container missing on {}: {}", url, e));
            None
        }
        Err(e) => return Err(e),
    };

    let title = session
        .query_selector(&source.title_selector)?
        .map(|heading| normalize_title(&heading.text().collect::<String>()))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());

    session.close();

    let (content, publication_date) = match content {
        Some(content) => {
            let date = extract_publication_date(&content);
            (content, date)
        }
        None => (CONTENT_NOT_FOUND.to_string(), DATE_NOT_FOUND.to_string()),
    };

    tracing::debug!(
        "Extracted '{}' from {} ({} chars, date: {})",
        title,
        url,
        content.len(),
        publication_date
    );

    Ok(RawPost {
        title,
        content,
        publication_date,
    })
}

/// Joins the words of a heading with single spaces
///
/// Titles are the deduplication key.
fn normalize_title(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rebuilds readable text from a DOM subtree
///
/// Depth-first: every non-empty text node contributes its trimmed text and a
/// line break; every block-level element adds a line break after its
/// children; hidden elements contribute nothing. The result is trimmed.
pub fn collect_text<N: DomNode>(root: &N) -> String {
    let mut out = String::new();
    walk(root, &mut out);
    out.trim().to_string()
}

fn walk<N: DomNode>(node: &N, out: &mut String) {
    if let Some(text) = node.text() {
        let text = text.trim();
        if !text.is_empty() {
            out.push_str(text);
            out.push('\n');
        }
        return;
    }

    let display = node.display();
    if display == Display::None {
        return;
    }

    for child in node.children() {
        walk(&child, out);
    }

    if display == Display::Block {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemoryRenderer;

    /// Hand-built DOM node
    #[derive(Clone)]
    struct FakeNode {
        text: Option<&'static str>,
        display: Display,
        children: Vec<FakeNode>,
    }

    fn text(value: &'static str) -> FakeNode {
        FakeNode {
            text: Some(value),
            display: Display::Inline,
            children: vec![],
        }
    }

    fn element(display: Display, children: Vec<FakeNode>) -> FakeNode {
        FakeNode {
            text: None,
            display,
            children,
        }
    }

    impl DomNode for FakeNode {
        fn text(&self) -> Option<&str> {
            self.text
        }

        fn children(&self) -> Vec<Self> {
            self.children.clone()
        }

        fn display(&self) -> Display {
            self.display
        }
    }

    #[test]
    fn test_walk_over_fake_tree() {
        let tree = element(
            Display::Block,
            vec![
                element(Display::Block, vec![text("  Heading  ")]),
                element(
                    Display::Block,
                    vec![
                        text("Some "),
                        element(Display::Inline, vec![text("bold")]),
                        text(" words"),
                    ],
                ),
                element(Display::None, vec![text("hidden")]),
                text("   "),
                element(Display::Block, vec![text("Last")]),
            ],
        );

        assert_eq!(
            collect_text(&tree),
            "Heading\n\nSome\nbold\nwords\n\nLast"
        );
    }

    #[test]
    fn test_walk_empty_tree() {
        let tree = element(Display::Block, vec![element(Display::Block, vec![])]);
        assert_eq!(collect_text(&tree), "");
    }

    #[test]
    fn test_walk_over_parsed_html() {
        let doc = crate::render::Document::parse(
            r#"<div class="blog-content">
                 <h1>Title</h1>
                 <p>First <a href="/x">link</a> para.</p>
                 <script>var x = 1;</script>
                 <ul><li>One</li><li>Two</li></ul>
               </div>"#,
        );
        let container = doc.query_selector("div.blog-content").unwrap().unwrap();

        assert_eq!(
            collect_text(&HtmlNode::from(container)),
            "Title\n\nFirst\nlink\npara.\n\nOne\n\nTwo"
        );
    }

    fn source() -> SourceConfig {
        SourceConfig {
            base_url: "https://example.com/blog".to_string(),
            post_path_marker: "/blog/".to_string(),
            featured_selector: "#featured".to_string(),
            recent_selector: "#recent".to_string(),
            title_selector: "h1".to_string(),
            content_selector: "div.blog-content".to_string(),
        }
    }

    #[tokio::test]
    async fn test_extract_post() {
        let renderer = MemoryRenderer::new();
        renderer.insert_page(
            "https://example.com/blog/post",
            r#"<html><body>
                 <h1>  A Post  </h1>
                 <div class="blog-content">
                   <p>Back to Articles</p>
                   <p>Published March 3, 2024</p>
                   <p>Body text.</p>
                 </div>
               </body></html>"#,
        );
        let mut log = ErrorLog::in_memory();

        let post = extract_post(
            &renderer,
            "https://example.com/blog/post",
            &source(),
            Timeouts::default(),
            &mut log,
        )
        .await
        .unwrap();

        assert_eq!(post.title, "A Post");
        assert_eq!(post.publication_date, "March 3, 2024");
        assert!(post.content.contains("Body text."));
        assert!(post.content.contains("Published March 3, 2024"));
        assert_eq!(renderer.open_sessions(), 0);
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_title_whitespace_is_collapsed() {
        let renderer = MemoryRenderer::new();
        renderer.insert_page(
            "https://example.com/blog/tuning",
            "<html><body><h1>\n   Fine-tuning\n   <span>LLMs</span>\n</h1>\
             <div class=\"blog-content\"><p>Body.</p></div></body></html>",
        );
        let mut log = ErrorLog::in_memory();

        let post = extract_post(
            &renderer,
            "https://example.com/blog/tuning",
            &source(),
            Timeouts::default(),
            &mut log,
        )
        .await
        .unwrap();

        assert_eq!(post.title, "Fine-tuning LLMs");
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  A \t Post\n\n Title "), "A Post Title");
        assert_eq!(normalize_title(" \n "), "");
    }

    #[tokio::test]
    async fn test_missing_container_yields_sentinels() {
        let renderer = MemoryRenderer::new();
        renderer.insert_page(
            "https://example.com/blog/empty",
            "<html><body><p>Published March 3, 2024</p></body></html>",
        );
        let mut log = ErrorLog::in_memory();

        let post = extract_post(
            &renderer,
            "https://example.com/blog/empty",
            &source(),
            Timeouts::default(),
            &mut log,
        )
        .await
        .unwrap();

        assert!(post.is_missing_title());
        assert!(post.is_missing_content());
        assert_eq!(post.publication_date, DATE_NOT_FOUND);
        assert_eq!(log.entries().len(), 1);
        assert_eq!(renderer.open_sessions(), 0);
    }

    #[tokio::test]
    async fn test_navigation_failure_closes_session() {
        let renderer = MemoryRenderer::new();
        renderer.insert_timeout("https://example.com/blog/slow");
        let mut log = ErrorLog::in_memory();

        let err = extract_post(
            &renderer,
            "https://example.com/blog/slow",
            &source(),
            Timeouts::default(),
            &mut log,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RenderError::NavigationTimeout { .. }));
        assert_eq!(renderer.open_sessions(), 0);
    }
}
