//! In-memory rendering sessions
//!
//! Serves pre-loaded HTML keyed by exact URL. Useful for replaying saved
//! pages offline and for exercising the pipeline without a network. It also
//! records every navigation and tracks how many sessions are still open.

use crate::render::{Document, RenderError, RenderSession, Renderer};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum MemoryPage {
    Html(String),
    Timeout,
    Failure(String),
}

#[derive(Debug, Default)]
struct Shared {
    pages: Mutex<HashMap<String, MemoryPage>>,
    navigations: Mutex<Vec<String>>,
    open_sessions: AtomicUsize,
}

/// Renderer backed by a map of URL to HTML
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    shared: Arc<Shared>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `html` for `url`
    pub fn insert_page(&self, url: &str, html: &str) {
        self.set(url, MemoryPage::Html(html.to_string()));
    }

    /// Makes navigation to `url` time out
    pub fn insert_timeout(&self, url: &str) {
        self.set(url, MemoryPage::Timeout);
    }

    /// Makes navigation to `url` fail with `message`
    pub fn insert_failure(&self, url: &str, message: &str) {
        self.set(url, MemoryPage::Failure(message.to_string()));
    }

    /// Every URL navigated to so far, in order
    pub fn navigations(&self) -> Vec<String> {
        lock(&self.shared.navigations).clone()
    }

    /// Number of sessions opened and not yet closed
    pub fn open_sessions(&self) -> usize {
        self.shared.open_sessions.load(Ordering::SeqCst)
    }

    fn set(&self, url: &str, page: MemoryPage) {
        lock(&self.shared.pages).insert(url.to_string(), page);
    }
}

impl Renderer for MemoryRenderer {
    type Session = MemorySession;

    fn open_session(&self) -> Result<MemorySession, RenderError> {
        self.shared.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(MemorySession {
            shared: Arc::clone(&self.shared),
            document: None,
        })
    }
}

/// Session handed out by [`MemoryRenderer`]
pub struct MemorySession {
    shared: Arc<Shared>,
    document: Option<Document>,
}

impl RenderSession for MemorySession {
    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<(), RenderError> {
        self.document = None;
        lock(&self.shared.navigations).push(url.to_string());

        let page = lock(&self.shared.pages).get(url).cloned();
        match page {
            Some(MemoryPage::Html(html)) => {
                self.document = Some(Document::parse(&html));
                Ok(())
            }
            Some(MemoryPage::Timeout) => Err(RenderError::NavigationTimeout {
                url: url.to_string(),
            }),
            Some(MemoryPage::Failure(message)) => Err(RenderError::Navigation {
                url: url.to_string(),
                message,
            }),
            None => Err(RenderError::Navigation {
                url: url.to_string(),
                message: "HTTP 404".to_string(),
            }),
        }
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<(), RenderError> {
        if self.document()?.contains(selector)? {
            Ok(())
        } else {
            Err(RenderError::SelectorTimeout {
                selector: selector.to_string(),
            })
        }
    }

    fn document(&self) -> Result<&Document, RenderError> {
        self.document.as_ref().ok_or(RenderError::NoDocument)
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.shared.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
