use url::Url;

/// Returns true if `href` looks like a post link
///
/// Decided on the raw href alone, so filtering never needs the network.
pub fn is_post_link(href: &str, marker: &str) -> bool {
    href.contains(marker)
}

/// Resolves a discovered href to an absolute post URL
///
/// # Resolution Rules
///
/// 1. Absolute URLs are kept as they are
/// 2. Root-relative hrefs (`/blog/post`) are joined to the base origin
/// 3. Path-relative hrefs resolve under the base path; a leading segment that
///    repeats the base's last path segment (`blog/post` against `.../blog`)
///    is dropped so it is not doubled
///
/// The fragment is always removed.
///
/// # Examples
///
/// ```
/// use blog_ingest::url::resolve_post_url;
/// use url::Url;
///
/// let base = Url::parse("https://huggingface.co/blog").unwrap();
/// assert_eq!(
///     resolve_post_url(&base, "/blog/post").unwrap().as_str(),
///     "https://huggingface.co/blog/post"
/// );
/// assert_eq!(
///     resolve_post_url(&base, "blog/post").unwrap().as_str(),
///     "https://huggingface.co/blog/post"
/// );
/// ```
pub fn resolve_post_url(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    let href = href.trim();

    let mut resolved = match Url::parse(href) {
        Ok(absolute) => absolute,
        Err(url::ParseError::RelativeUrlWithoutBase) if href.starts_with('/') => {
            base.join(href)?
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let last_segment = base
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last());

            let relative = last_segment
                .and_then(|segment| href.strip_prefix(segment))
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(href);

            base_directory(base).join(relative)?
        }
        Err(e) => return Err(e),
    };

    resolved.set_fragment(None);
    Ok(resolved)
}

/// The base URL with a trailing slash, so relative joins stay under its path
fn base_directory(base: &Url) -> Url {
    let mut directory = base.clone();
    directory.set_query(None);
    directory.set_fragment(None);
    if !directory.path().ends_with('/') {
        let path = format!("{}/", directory.path());
        directory.set_path(&path);
    }
    directory
}
