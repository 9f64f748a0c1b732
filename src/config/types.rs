use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Blog-Ingest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub browser: BrowserConfig,
    pub output: OutputConfig,
}

/// Where posts come from and how to find them on the page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Listing page that links to the posts
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Substring every post link contains
    #[serde(rename = "post-path-marker")]
    pub post_path_marker: String,

    /// Region holding the single featured post
    #[serde(rename = "featured-selector")]
    pub featured_selector: String,

    /// Region whose direct children are the recent post cards
    #[serde(rename = "recent-selector")]
    pub recent_selector: String,

    /// Heading that carries the post title
    #[serde(rename = "title-selector")]
    pub title_selector: String,

    /// Container holding the readable post body
    #[serde(rename = "content-selector")]
    pub content_selector: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://huggingface.co/blog".to_string(),
            post_path_marker: "/blog/".to_string(),
            featured_selector:
                "body > div > main > div > div:nth-of-type(1) > div:nth-of-type(3) > div"
                    .to_string(),
            recent_selector: "body > div > main > div > div:nth-of-type(1) > div:nth-of-type(5)"
                .to_string(),
            title_selector: "h1".to_string(),
            content_selector: "div.blog-content".to_string(),
        }
    }
}

/// Rendering session behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Upper bound on loading a page (milliseconds)
    #[serde(rename = "navigation-timeout-ms")]
    pub navigation_timeout_ms: u64,

    /// Upper bound on waiting for a selector to appear (milliseconds)
    #[serde(rename = "selector-timeout-ms")]
    pub selector_timeout_ms: u64,

    /// User agent sent with every page request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: 30_000,
            selector_timeout_ms: 10_000,
            user_agent: concat!("blog-ingest/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl BrowserConfig {
    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            navigation: Duration::from_millis(self.navigation_timeout_ms),
            selector: Duration::from_millis(self.selector_timeout_ms),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the append-only error log
    #[serde(rename = "error-log-path")]
    pub error_log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "blog_posts.db".to_string(),
            error_log_path: "scraping_errors.log".to_string(),
        }
    }
}

/// Wait bounds handed to every rendering operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub navigation: Duration,
    pub selector: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        BrowserConfig::default().timeouts()
    }
}
