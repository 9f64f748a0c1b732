//! Listing page link discovery

use crate::config::{SourceConfig, Timeouts};
use crate::output::ErrorLog;
use crate::render::{first_anchor_href, RenderError, RenderSession, Renderer};
use scraper::ElementRef;

/// Discovers candidate post links on the listing page
///
/// # Discovery Order
///
/// 1. The first anchor inside the featured region
/// 2. For each direct child element of the recent-posts region, in DOM
///    order, the first anchor inside it
///
/// A region that never appears, or holds no anchor, contributes nothing and
/// is logged. A listing page that fails to load is logged and yields an empty
/// list. Discovery never fails the run, and the session is closed on every
/// path.
///
/// # Arguments
///
/// * `renderer` - Launches the rendering session
/// * `source` - Listing URL and region selectors
/// * `timeouts` - Navigation and selector wait bounds
/// * `log` - Receives recoverable failures
///
/// # Returns
///
/// Raw `href` values, relative or absolute, in discovery order
pub async fn discover_links<R: Renderer>(
    renderer: &R,
    source: &SourceConfig,
    timeouts: Timeouts,
    log: &mut ErrorLog,
) -> Vec<String> {
    match try_discover_links(renderer, source, timeouts, log).await {
        Ok(links) => links,
        Err(e) => {
            log.error(format!(
                "Link discovery failed for {}: {}",
                source.base_url, e
            ));
            Vec::new()
        }
    }
}

async fn try_discover_links<R: Renderer>(
    renderer: &R,
    source: &SourceConfig,
    timeouts: Timeouts,
    log: &mut ErrorLog,
) -> Result<Vec<String>, RenderError> {
    let mut session = renderer.open_session()?;
    session.navigate(&source.base_url, timeouts.navigation).await?;

    let mut links = Vec::new();

    match session
        .wait_for_selector(&source.featured_selector, timeouts.selector)
        .await
    {
        Ok(()) => {
            let featured = match session.query_selector(&source.featured_selector)? {
                Some(region) => first_anchor_href(region)?,
                None => None,
            };
            match featured {
                Some(href) => links.push(href),
                None => tracing::info!("Featured region has no post link"),
            }
        }
        Err(e) if e.is_selector_timeout() => {
            log.warn(format!("Featured region not found: {}", e));
        }
        Err(e) => return Err(e),
    }

    match session
        .wait_for_selector(&source.recent_selector, timeouts.selector)
        .await
    {
        Ok(()) => {
            if let Some(region) = session.query_selector(&source.recent_selector)? {
                for card in region.children().filter_map(ElementRef::wrap) {
                    if let Some(href) = first_anchor_href(card)? {
                        links.push(href);
                    }
                }
            }
        }
        Err(e) if e.is_selector_timeout() => {
            log.warn(format!("Recent posts region not found: {}", e));
        }
        Err(e) => return Err(e),
    }

    session.close();

    tracing::info!("Found {} candidate links on {}", links.len(), source.base_url);
    Ok(links)
}
