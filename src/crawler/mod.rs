//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a bounded timeout
//! - HTML text and link extraction
//! - The shared scheduler that owns the frontier and the index
//! - The worker procedure and the coordinating crawl loop

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;
mod worker;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{clean_text, extract_page, extract_text, ExtractedPage};
pub use scheduler::{RecordOutcome, Scheduler};
pub use worker::{process_url, PageOutcome, WorkerContext};

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::SieveError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the content directory and load the index
/// 2. Restore the saved frontier, or seed it from the config
/// 3. Fetch pages with a bounded pool of workers, following in-scope links
/// 4. Checkpoint the frontier until the work runs out or Ctrl-C is pressed
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `fresh` - Ignore the saved frontier and start from the seeds
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl finished or was interrupted cleanly
/// * `Err(SieveError)` - Crawl could not start
pub async fn crawl(config: Config, fresh: bool) -> Result<CrawlSummary, SieveError> {
    run_crawl(config, fresh).await
}
