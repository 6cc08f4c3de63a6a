//! Sieve-Crawl main entry point
//!
//! This is the command-line interface for the Sieve-Crawl single-host crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sieve_crawl::config::{load_config_with_hash, Config};
use sieve_crawl::crawler::crawl;
use sieve_crawl::state::Frontier;
use sieve_crawl::storage::{load_frontier, CsvIndex, IndexStore};
use sieve_crawl::url::{is_in_scope, CanonicalUrl};
use tracing_subscriber::EnvFilter;

/// Sieve-Crawl: a resumable single-host crawler
///
/// Sieve-Crawl fetches every page reachable from the seed URLs on hosts that
/// match the configured filter, stores each page's text as a numbered file,
/// and records it in a CSV index so no page is stored twice across runs.
#[derive(Parser, Debug)]
#[command(name = "sieve-crawl")]
#[command(version)]
#[command(about = "A resumable single-host crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Ignore the saved frontier and start from the seeds (the index is kept)
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the index and frontier checkpoint and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config, cli.fresh);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sieve_crawl=info,warn"),
            1 => EnvFilter::new("sieve_crawl=debug,info"),
            2 => EnvFilter::new("sieve_crawl=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, fresh: bool) {
    println!("=== Sieve-Crawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Host filter: {}", config.crawler.host_filter);
    println!("  Workers: {}", config.crawler.workers);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout);
    println!("  Request delay: {}ms", config.crawler.request_delay);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Index: {}", config.output.index_path.display());
    println!("  Content directory: {}", config.output.content_dir.display());
    println!("  Frontier checkpoint: {}", config.output.frontier_path.display());

    let index = CsvIndex::open(&config.output.index_path);
    println!("\nAlready indexed: {} pages", index.len());

    let saved = if fresh {
        Vec::new()
    } else {
        load_frontier(&config.output.frontier_path)
    };
    let restored = Frontier::restore(saved);
    if !restored.is_empty() {
        println!(
            "\n✓ Would resume with {} queued URLs; seeds are ignored",
            restored.len()
        );
        return;
    }

    println!("\nSeeds ({}):", config.crawler.seeds.len());
    let mut would_enqueue = 0;
    for seed in &config.crawler.seeds {
        let verdict = match CanonicalUrl::parse(seed) {
            Err(e) => format!("skipped ({})", e),
            Ok(url) if !is_in_scope(&url, &config.crawler.host_filter) => {
                format!("skipped ({} is out of scope)", url)
            }
            Ok(url) if index.contains(url.as_str()) => {
                format!("skipped ({} is already indexed)", url)
            }
            Ok(url) => {
                would_enqueue += 1;
                format!("queued as {}", url)
            }
        };
        println!("  - {}: {}", seed, verdict);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling with {} seed URLs", would_enqueue);
}

/// Handles the --stats mode: shows statistics from the files on disk
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use sieve_crawl::output::{load_statistics, print_statistics};

    println!("Index: {}\n", config.output.index_path.display());

    let stats = load_statistics(config).context("Failed to load statistics")?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, fresh: bool) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh crawl (ignoring saved frontier)");
    } else {
        tracing::info!("Starting crawl (will resume from saved frontier if present)");
    }

    tracing::info!(
        "Host filter: '{}', seeds: {}",
        config.crawler.host_filter,
        config.crawler.seeds.len()
    );

    let summary = crawl(config, fresh).await.context("Crawl failed")?;
    if summary.interrupted {
        tracing::info!("Crawl interrupted; rerun to resume");
    } else {
        tracing::info!("Crawl completed successfully");
    }

    Ok(())
}
