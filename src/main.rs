//! Blog-Ingest main entry point
//!
//! This is the command-line interface for the Blog-Ingest article ingester.

use blog_ingest::config::{load_config_with_hash, validate, Config};
use blog_ingest::crawler::{run_ingest, Coordinator};
use blog_ingest::output::ErrorLog;
use blog_ingest::render::HttpRenderer;
use blog_ingest::storage::SqlitePostStore;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Blog-Ingest: a single-site article ingester
///
/// Blog-Ingest discovers posts on a blog listing page, extracts and cleans
/// each one, and stores new posts in a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "blog-ingest")]
#[command(version)]
#[command(about = "A single-site article ingester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Listing page to ingest from
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// SQLite database path
    #[arg(long, value_name = "PATH")]
    database: Option<String>,

    /// Error log path
    #[arg(long, value_name = "PATH")]
    error_log: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// List discovered links and what would happen to them, without ingesting
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config).await?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_ingest(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("blog_ingest=info,warn"),
            1 => EnvFilter::new("blog_ingest=debug,info"),
            2 => EnvFilter::new("blog_ingest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if given, then applies command-line overrides
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.source.base_url = base_url.clone();
    }
    if let Some(database) = &cli.database {
        config.output.database_path = database.clone();
    }
    if let Some(error_log) = &cli.error_log {
        config.output.error_log_path = error_log.clone();
    }

    // Overrides bypass file validation
    validate(&config)?;

    Ok(config)
}

/// Handles the --dry-run mode: lists discovered links with their verdicts
async fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Blog-Ingest Dry Run ===\n");
    println!("Listing: {}", config.source.base_url);
    println!("Post marker: {}\n", config.source.post_path_marker);

    // Nothing is written: the store and error log stay in memory
    let mut coordinator = Coordinator::new(
        config,
        HttpRenderer::new(&config.browser)?,
        SqlitePostStore::new_in_memory()?,
        ErrorLog::in_memory(),
    )?;
    let links = coordinator.preview().await;

    let posts = links.iter().filter(|link| link.is_post).count();
    println!("Found {} links ({} posts):", links.len(), posts);
    for link in &links {
        match (&link.resolved, link.is_post) {
            (Some(url), _) => println!("  + {} -> {}", link.href, url),
            (None, true) => println!("  ! {} (cannot resolve)", link.href),
            (None, false) => println!("  - {} (not a post)", link.href),
        }
    }

    Ok(())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use blog_ingest::output::{load_statistics, print_statistics};
    use blog_ingest::storage::open_store;
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let store = open_store(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main ingestion run
async fn handle_ingest(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting ingestion from {}", config.source.base_url);

    match run_ingest(config).await {
        Ok(summary) => {
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Ingestion failed: {}", e);
            Err(e.into())
        }
    }
}
