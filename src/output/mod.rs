//! Output module for reporting crawl results
//!
//! This module handles:
//! - The per-run summary logged when a crawl ends
//! - Statistics read back from the index, checkpoint and content directory

pub mod stats;
mod summary;

pub use stats::{load_statistics, print_statistics, CrawlStatistics};
pub use summary::CrawlSummary;
