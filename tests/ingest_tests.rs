//! Integration tests for the ingestion pipeline
//!
//! These tests use wiremock to serve listing and post pages to the real
//! HTTP renderer, and the in-memory renderer for scenarios that need to
//! observe which pages were navigated.

use blog_ingest::config::Config;
use blog_ingest::crawler::{run_ingest, Coordinator};
use blog_ingest::output::ErrorLog;
use blog_ingest::render::MemoryRenderer;
use blog_ingest::storage::{NewPost, PostStore, SqlitePostStore};
use chrono::NaiveDate;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_HTML: &str = r#"<html><body>
    <div id="featured"><div><a href="/blog/a">Featured A</a></div></div>
    <div id="recent">
        <article><a href="/blog/b">Recent B</a></article>
        <article><a href="/pricing">Pricing</a></article>
        <a href="/blog/c">Recent C</a>
    </div>
</body></html>"#;

/// Creates a test configuration pointed at `base_url` with files in `dir`
fn create_test_config(base_url: &str, dir: &Path) -> Config {
    let mut config = Config::default();
    config.source.base_url = base_url.to_string();
    config.source.featured_selector = "#featured".to_string();
    config.source.recent_selector = "#recent".to_string();
    config.browser.navigation_timeout_ms = 5000;
    config.browser.selector_timeout_ms = 1000;
    config.output.database_path = dir.join("posts.db").to_string_lossy().to_string();
    config.output.error_log_path = dir.join("errors.log").to_string_lossy().to_string();
    config
}

fn post_html(title: &str, date: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{title}</title></head><body>
        <h1>{title}</h1>
        <div class="blog-content">
            <a href="/blog">Back to Articles</a>
            <h1>{title}</h1>
            <span>Published {date}</span>
            <span>Update on GitHub</span>
            <p>{body}</p>
        </div>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn start_blog_server() -> MockServer {
    let server = MockServer::start().await;
    mount_html(&server, "/blog", LISTING_HTML.to_string()).await;
    mount_html(
        &server,
        "/blog/a",
        post_html("Post A", "March 5, 2024", "Alpha body."),
    )
    .await;
    mount_html(
        &server,
        "/blog/b",
        post_html("Post B", "Jan 1, 2024", "Beta body."),
    )
    .await;
    server
}

fn error_lines(path: &str) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .filter(|line| line.contains(" - ERROR - "))
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_full_ingest_is_idempotent() {
    let server = start_blog_server().await;
    mount_html(
        &server,
        "/blog/c",
        post_html("Post C", "Feb. 2, 2024", "Gamma body."),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/blog", server.uri()), dir.path());

    let first = run_ingest(&config).await.expect("First run failed");
    assert_eq!(first.discovered, 4);
    assert_eq!(first.filtered_out, 1);
    assert_eq!(first.persisted, 3);
    assert_eq!(first.failures(), 0);

    let second = run_ingest(&config).await.expect("Second run failed");
    assert_eq!(second.persisted, 0);
    assert_eq!(second.duplicate_skipped, 3);

    let store = SqlitePostStore::new(Path::new(&config.output.database_path)).unwrap();
    assert_eq!(store.count_posts().unwrap(), 3);

    let post_c = store.get_post_by_title("Post C").unwrap().unwrap();
    assert_eq!(post_c.date, "Feb. 2, 2024");
    assert_eq!(post_c.url, format!("{}/blog/c", server.uri()));
    assert!(error_lines(&config.output.error_log_path).is_empty());
}

#[tokio::test]
async fn test_failing_post_is_isolated() {
    let server = start_blog_server().await;
    Mock::given(method("GET"))
        .and(path("/blog/c"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/blog", server.uri()), dir.path());

    let summary = run_ingest(&config).await.expect("Run failed");
    assert_eq!(summary.persisted, 2);
    assert_eq!(summary.extract_failed, 1);

    let store = SqlitePostStore::new(Path::new(&config.output.database_path)).unwrap();
    assert_eq!(store.count_posts().unwrap(), 2);

    let errors = error_lines(&config.output.error_log_path);
    assert_eq!(errors.len(), 1, "Expected one error line, got {:?}", errors);
    assert!(errors[0].contains(&format!("{}/blog/c", server.uri())));
    assert!(errors[0].contains("HTTP 500"));
}

#[tokio::test]
async fn test_unreachable_listing_yields_empty_run() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config("http://127.0.0.1:9/blog", dir.path());

    let summary = run_ingest(&config).await.expect("Run should not fail");
    assert_eq!(summary.discovered, 0);

    let errors = error_lines(&config.output.error_log_path);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Link discovery failed"));
}

#[tokio::test]
async fn test_existing_post_skipped_and_new_post_cleaned() {
    let renderer = MemoryRenderer::new();
    renderer.insert_page(
        "https://example.com/blog",
        r#"<div id="featured"><a href="/blog/a">A</a></div>
           <div id="recent"><div><a href="/blog/b">B</a></div></div>"#,
    );
    renderer.insert_page(
        "https://example.com/blog/a",
        &post_html("Post A", "March 5, 2024", "Changed body."),
    );
    renderer.insert_page(
        "https://example.com/blog/b",
        &post_html("Post B", "Jan 1, 2024", "Beta body."),
    );

    let mut store = SqlitePostStore::new_in_memory().unwrap();
    store
        .insert_if_new(&NewPost {
            title: "Post A".to_string(),
            date: "March 5, 2024".to_string(),
            content: "Original body.".to_string(),
            url: "https://example.com/blog/a".to_string(),
            scraping_date: "2024-03-05".to_string(),
        })
        .unwrap();

    let dir = TempDir::new().unwrap();
    let config = create_test_config("https://example.com/blog", dir.path());
    let mut coordinator = Coordinator::new(&config, renderer, store, ErrorLog::in_memory())
        .unwrap()
        .with_scraping_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

    let summary = coordinator.run().await;
    assert_eq!(summary.duplicate_skipped, 1);
    assert_eq!(summary.persisted, 1);

    let store = coordinator.store();
    assert_eq!(store.count_posts().unwrap(), 2);

    let post_a = store.get_post_by_title("Post A").unwrap().unwrap();
    assert_eq!(post_a.content, "Original body.");

    let post_b = store.get_post_by_title("Post B").unwrap().unwrap();
    assert_eq!(post_b.date, "Jan 1, 2024");
    assert_eq!(post_b.scraping_date, "2024-06-01");
    assert!(!post_b.content.contains("Published"));
    assert!(!post_b.content.contains("Back to Articles"));
    assert!(post_b.content.contains("Beta body."));
}

#[tokio::test]
async fn test_non_post_links_never_navigated() {
    let renderer = MemoryRenderer::new();
    renderer.insert_page(
        "https://example.com/blog",
        r#"<div id="featured"><a href="/blog/a">A</a></div>
           <div id="recent">
               <div><a href="/pricing">Pricing</a></div>
               <div><a href="https://other.example.com/docs">Docs</a></div>
           </div>"#,
    );
    renderer.insert_page(
        "https://example.com/blog/a",
        &post_html("Post A", "March 5, 2024", "Alpha body."),
    );

    let dir = TempDir::new().unwrap();
    let config = create_test_config("https://example.com/blog", dir.path());
    let mut coordinator = Coordinator::new(
        &config,
        renderer.clone(),
        SqlitePostStore::new_in_memory().unwrap(),
        ErrorLog::in_memory(),
    )
    .unwrap();

    let summary = coordinator.run().await;
    assert_eq!(summary.filtered_out, 2);
    assert_eq!(summary.persisted, 1);

    assert_eq!(
        renderer.navigations(),
        vec!["https://example.com/blog", "https://example.com/blog/a"]
    );
    assert_eq!(renderer.open_sessions(), 0);
}
