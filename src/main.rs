//! Vacancy-Harvest main entry point
//!
//! This is the command-line interface for the Vacancy-Harvest listing crawler.

use anyhow::Context;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use vacancy_harvest::config::{load_config_with_hash, validate, Config};
use vacancy_harvest::storage::CsvSink;
use vacancy_harvest::{CrawlDriver, SearchArea};

/// Vacancy-Harvest: a paced job-listing crawler
///
/// Walks the paginated vacancy search once per search area, reads every listing
/// and its detail page, and appends normalized rows to a CSV dataset.
#[derive(Parser, Debug)]
#[command(name = "vacancy-harvest")]
#[command(version)]
#[command(about = "A paced job-listing crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file; built-in defaults are used without one
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Free-text search query
    #[arg(long)]
    query: Option<String>,

    /// Path to the CSV dataset
    #[arg(long, value_name = "PATH")]
    dataset: Option<String>,

    /// Recreate the dataset with a header row instead of appending
    #[arg(long)]
    overwrite: bool,

    /// Maximum pages per area
    #[arg(long, conflicts_with = "no_page_cap")]
    max_pages: Option<u32>,

    /// Crawl every area until the results run out
    #[arg(long)]
    no_page_cap: bool,

    /// Delay after every request, in milliseconds
    #[arg(long)]
    pause_ms: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Crawl only this area (repeatable)
    #[arg(long = "area", value_name = "NAME")]
    areas: Vec<String>,

    /// Print the known search areas and exit
    #[arg(long)]
    list_areas: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    logs: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_areas {
        handle_list_areas();
        return Ok(());
    }

    setup_logging(cli.verbose, cli.quiet, cli.logs.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid settings")?;

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool, logs: Option<&Path>) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vacancy_harvest=info,warn"),
            1 => EnvFilter::new("vacancy_harvest=debug,info"),
            2 => EnvFilter::new("vacancy_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    match logs {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.init(),
    }

    Ok(())
}

/// Applies command-line settings on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(query) = &cli.query {
        config.search.text = query.clone();
    }
    if let Some(dataset) = &cli.dataset {
        config.output.dataset_path = dataset.clone();
    }
    if cli.overwrite {
        config.output.overwrite = true;
    }
    if cli.no_page_cap {
        config.crawler.max_pages = None;
    } else if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = Some(max_pages);
    }
    if let Some(pause_ms) = cli.pause_ms {
        config.http.pacing_ms = pause_ms;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.http.timeout_secs = timeout_secs;
    }
    if !cli.areas.is_empty() {
        config.crawler.areas = cli.areas.clone();
    }
}

/// Handles the --list-areas mode: prints every area and its code
fn handle_list_areas() {
    println!("=== Search Areas ===\n");
    for area in SearchArea::ALL {
        let note = if area.is_unscoped() {
            "  (unscoped, never crawled)"
        } else {
            ""
        };
        println!("  {:>5}  {}{}", area.code, area.name, note);
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let driver = CrawlDriver::from_config(config).context("Failed to set up the crawler")?;

    tracing::info!(
        "Query '{}', {} areas, page cap {}, pacing {:?}, timeout {:?}",
        config.search.text,
        driver.areas().len(),
        config
            .crawler
            .max_pages
            .map_or_else(|| "none".to_string(), |m| m.to_string()),
        config.http.pacing(),
        config.http.timeout()
    );

    let dataset = Path::new(&config.output.dataset_path);
    let mut sink = CsvSink::bootstrap(dataset, config.output.overwrite)
        .with_context(|| format!("Failed to open dataset {}", dataset.display()))?;

    let summary = driver.run(&mut sink).await;

    if summary.is_clean() {
        tracing::info!("Crawl completed successfully");
    } else {
        tracing::warn!(
            "Crawl completed with {} failed areas",
            summary.failed_areas().count()
        );
    }
    tracing::info!("{} rows in {}", sink.rows_written(), sink.path().display());

    Ok(())
}
