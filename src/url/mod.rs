//! URL handling module for Blog-Ingest
//!
//! This module decides which discovered links are posts and turns them into
//! absolute URLs against the listing page.

mod resolve;

pub use resolve::{is_post_link, resolve_post_url};
