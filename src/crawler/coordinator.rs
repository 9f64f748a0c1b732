//! Crawl coordinator - one ingestion pass over the listing page
//!
//! This module drives every discovered link through the pipeline:
//! - Filtering out non-post links before any network call
//! - Resolving post links against the listing URL
//! - Rendering and extracting the post
//! - Cleaning and stamping the record
//! - Storing it unless it is a duplicate or empty
//!
//! Each link's failure is logged and contained; it never affects the next link.

use crate::config::{Config, SourceConfig, Timeouts};
use crate::crawler::state::LinkState;
use crate::extract::{
    clean_content, discover_links, extract_post, RawPost, CONTENT_NOT_FOUND, TITLE_NOT_FOUND,
};
use crate::output::ErrorLog;
use crate::render::Renderer;
use crate::storage::{NewPost, PostStore};
use crate::url::{is_post_link, resolve_post_url};
use crate::ScrapeError;
use chrono::{Local, NaiveDate};
use std::fmt;
use url::Url;

/// Counts of link outcomes for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    pub filtered_out: usize,
    pub extract_failed: usize,
    pub persisted: usize,
    pub duplicate_skipped: usize,
    pub empty_skipped: usize,
    pub store_failed: usize,
}

impl RunSummary {
    /// Tallies one link's terminal state
    pub fn record(&mut self, state: LinkState) {
        match state {
            LinkState::FilteredOut => self.filtered_out += 1,
            LinkState::ExtractFailed => self.extract_failed += 1,
            LinkState::Persisted => self.persisted += 1,
            LinkState::DuplicateSkipped => self.duplicate_skipped += 1,
            LinkState::EmptySkipped => self.empty_skipped += 1,
            LinkState::StoreFailed => self.store_failed += 1,
            other => tracing::warn!("Link finished in non-terminal state {}", other),
        }
    }

    /// Links that failed rather than being skipped or stored
    pub fn failures(&self) -> usize {
        self.extract_failed + self.store_failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} links: {} inserted, {} duplicates, {} empty, {} not posts, {} failed",
            self.discovered,
            self.persisted,
            self.duplicate_skipped,
            self.empty_skipped,
            self.filtered_out,
            self.failures()
        )
    }
}

/// A discovered link with the verdict the pipeline would reach for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPreview {
    pub href: String,
    pub is_post: bool,
    pub resolved: Option<String>,
}

/// Main ingestion coordinator
///
/// Owns the renderer, the store connection and the error log for the whole
/// run; all three are released when the coordinator is dropped.
pub struct Coordinator<R, S> {
    source: SourceConfig,
    base_url: Url,
    timeouts: Timeouts,
    renderer: R,
    store: S,
    log: ErrorLog,
    scraping_date: String,
}

impl<R: Renderer, S: PostStore> Coordinator<R, S> {
    /// Creates a coordinator stamping records with today's local date
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScrapeError)` - The configured base URL does not parse
    pub fn new(config: &Config, renderer: R, store: S, log: ErrorLog) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.source.base_url)?;

        Ok(Self {
            source: config.source.clone(),
            base_url,
            timeouts: config.browser.timeouts(),
            renderer,
            store,
            log,
            scraping_date: format_date(Local::now().date_naive()),
        })
    }

    /// Overrides the ingestion date stamped on new records
    pub fn with_scraping_date(mut self, date: NaiveDate) -> Self {
        self.scraping_date = format_date(date);
        self
    }

    /// Runs one full ingestion pass
    ///
    /// Links are processed one at a time in discovery order. Per-link
    /// failures are logged and counted; the pass always reaches the end of
    /// the list.
    pub async fn run(&mut self) -> RunSummary {
        tracing::info!("Starting ingestion run for {}", self.base_url);
        let start_time = std::time::Instant::now();

        let links = discover_links(&self.renderer, &self.source, self.timeouts, &mut self.log).await;

        let mut summary = RunSummary {
            discovered: links.len(),
            ..RunSummary::default()
        };

        for (index, href) in links.iter().enumerate() {
            let state = self.process_link(href).await;
            tracing::debug!("[{}/{}] {} -> {}", index + 1, links.len(), href, state);
            summary.record(state);
        }

        tracing::info!(
            "Ingestion completed in {:?}: {}",
            start_time.elapsed(),
            summary
        );

        summary
    }

    /// Runs a single link through the pipeline and returns its terminal state
    pub async fn process_link(&mut self, href: &str) -> LinkState {
        let state = LinkState::Discovered;

        if !is_post_link(href, &self.source.post_path_marker) {
            tracing::info!("Skipping non-post link: {}", href);
            return state.advance(LinkState::FilteredOut);
        }

        let url = match resolve_post_url(&self.base_url, href) {
            Ok(url) => url,
            Err(e) => {
                self.log.error(format!("Cannot resolve link {}: {}", href, e));
                return state.advance(LinkState::ExtractFailed);
            }
        };

        tracing::info!("Processing post: {}", url);
        let state = state.advance(LinkState::Extracting);

        let raw = match extract_post(
            &self.renderer,
            url.as_str(),
            &self.source,
            self.timeouts,
            &mut self.log,
        )
        .await
        {
            Ok(raw) => raw,
            Err(e) => {
                let kind = if e.is_navigation() {
                    "Navigation error"
                } else {
                    "Extraction error"
                };
                self.log.error(format!("{} for {}: {}", kind, url, e));
                return state.advance(LinkState::ExtractFailed);
            }
        };
        let state = state.advance(LinkState::Extracted);

        let post = self.prepare(raw, &url);
        let state = state.advance(LinkState::Cleaned);

        match self.store.insert_if_new(&post) {
            Ok(true) => {
                tracing::info!("Inserted: {}", post.title);
                state.advance(LinkState::Persisted)
            }
            Ok(false) if post.title == TITLE_NOT_FOUND || post.content == CONTENT_NOT_FOUND => {
                tracing::info!("Skipped (missing title or content): {}", url);
                state.advance(LinkState::EmptySkipped)
            }
            Ok(false) => {
                tracing::info!("Skipped (already stored): {}", post.title);
                state.advance(LinkState::DuplicateSkipped)
            }
            Err(e) => {
                self.log.error(format!("Failed to store {}: {}", url, e));
                state.advance(LinkState::StoreFailed)
            }
        }
    }

    /// Discovers links and reports what the pipeline would do with each,
    /// without rendering any post
    pub async fn preview(&mut self) -> Vec<LinkPreview> {
        let links = discover_links(&self.renderer, &self.source, self.timeouts, &mut self.log).await;

        links
            .into_iter()
            .map(|href| {
                let is_post = is_post_link(&href, &self.source.post_path_marker);
                let resolved = if is_post {
                    resolve_post_url(&self.base_url, &href)
                        .ok()
                        .map(|url| url.to_string())
                } else {
                    None
                };
                LinkPreview {
                    href,
                    is_post,
                    resolved,
                }
            })
            .collect()
    }

    /// Cleans and stamps a raw post
    fn prepare(&self, raw: RawPost, url: &Url) -> NewPost {
        let content = if raw.is_missing_content() {
            raw.content
        } else {
            let cleaned = clean_content(&raw.content);
            if cleaned.is_empty() {
                CONTENT_NOT_FOUND.to_string()
            } else {
                cleaned
            }
        };

        NewPost {
            title: raw.title,
            date: raw.publication_date,
            content,
            url: url.to_string(),
            scraping_date: self.scraping_date.clone(),
        }
    }

    /// The store this coordinator writes to
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Failures recorded so far in this run
    pub fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    /// Date stamped on records from this run (`YYYY-MM-DD`)
    pub fn scraping_date(&self) -> &str {
        &self.scraping_date
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
