//! End-of-run crawl summary

use crate::crawler::PageOutcome;

/// Tally of what one crawl session did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages written to the content store and index this session
    pub pages_stored: u64,

    /// Dispatched URLs that turned out to be indexed already
    pub already_indexed: u64,

    /// URLs dropped because the fetch failed
    pub fetch_failures: u64,

    /// Pages fetched but not persisted
    pub store_failures: u64,

    /// True if the crawl stopped on a shutdown signal rather than running dry
    pub interrupted: bool,

    /// Highest index allocated when the session ended
    pub last_index: u64,
}

impl CrawlSummary {
    /// Counts one finished worker
    pub fn record(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Stored => self.pages_stored += 1,
            PageOutcome::AlreadyIndexed => self.already_indexed += 1,
            PageOutcome::FetchFailed => self.fetch_failures += 1,
            PageOutcome::StoreFailed => self.store_failures += 1,
        }
    }

    /// Total URLs that reached a worker
    pub fn processed(&self) -> u64 {
        self.pages_stored + self.already_indexed + self.fetch_failures + self.store_failures
    }

    pub fn log(&self) {
        tracing::info!(
            "Crawl {}: {} URLs processed, {} stored, {} already indexed, {} fetch failures, {} store failures (last index {})",
            if self.interrupted { "interrupted" } else { "complete" },
            self.processed(),
            self.pages_stored,
            self.already_indexed,
            self.fetch_failures,
            self.store_failures,
            self.last_index
        );
    }
}
