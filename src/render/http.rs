//! HTTP-backed rendering sessions
//!
//! This renderer handles:
//! - Building one HTTP client per run with the configured user agent
//! - GET requests bounded by the navigation timeout
//! - Classifying failures into timeouts versus other navigation errors
//! - Parsing the response body into a [`Document`]

use crate::config::BrowserConfig;
use crate::render::{Document, RenderError, RenderSession, Renderer};
use reqwest::Client;
use std::time::Duration;

/// Renderer that loads pages with a shared HTTP client
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    /// Builds the HTTP client used by every session
    ///
    /// Failure here is a startup failure and aborts the run.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use blog_ingest::config::BrowserConfig;
    /// use blog_ingest::render::HttpRenderer;
    ///
    /// let renderer = HttpRenderer::new(&BrowserConfig::default()).unwrap();
    /// ```
    pub fn new(config: &BrowserConfig) -> Result<Self, RenderError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.navigation_timeout_ms))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| RenderError::SessionStartup(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Renderer for HttpRenderer {
    type Session = HttpSession;

    fn open_session(&self) -> Result<HttpSession, RenderError> {
        Ok(HttpSession {
            client: self.client.clone(),
            url: None,
            document: None,
        })
    }
}

/// One page load over HTTP
pub struct HttpSession {
    client: Client,
    url: Option<String>,
    document: Option<Document>,
}

impl HttpSession {
    async fn fetch(&self, url: &str) -> Result<String, RenderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Navigation {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| classify_error(url, e))
    }
}

impl RenderSession for HttpSession {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError> {
        self.document = None;
        self.url = Some(url.to_string());

        let body = match tokio::time::timeout(timeout, self.fetch(url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(RenderError::NavigationTimeout {
                    url: url.to_string(),
                })
            }
        };

        tracing::debug!("Loaded {} ({} bytes)", url, body.len());
        self.document = Some(Document::parse(&body));
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), RenderError> {
        // A fetched document is complete: what is absent now never appears.
        if self.document()?.contains(selector)? {
            return Ok(());
        }

        tracing::debug!(
            "Selector '{}' absent from {} (wait bound {:?})",
            selector,
            self.url.as_deref().unwrap_or("<none>"),
            timeout
        );
        Err(RenderError::SelectorTimeout {
            selector: selector.to_string(),
        })
    }

    fn document(&self) -> Result<&Document, RenderError> {
        self.document.as_ref().ok_or(RenderError::NoDocument)
    }
}

/// Maps a reqwest failure to the matching navigation error kind
fn classify_error(url: &str, error: reqwest::Error) -> RenderError {
    if error.is_timeout() {
        RenderError::NavigationTimeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        RenderError::Navigation {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        RenderError::Navigation {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
