//! Crawl frontier: the FIFO queue of URLs awaiting processing
//!
//! The frontier is paired with the session's seen-set: every URL enqueued
//! during this process lifetime, whether still queued, in flight or already
//! finished. A URL enters the queue at most once per session and never if the
//! persistent index already holds it.

use crate::storage::IndexStore;
use crate::url::{is_in_scope, CanonicalUrl};
use std::collections::{HashSet, VecDeque};

/// Result of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// The URL was appended to the queue
    Enqueued,

    /// The URL was seen this session or is already indexed
    Skipped,
}

/// FIFO work queue with per-session dedup
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<CanonicalUrl>,
    seen: HashSet<CanonicalUrl>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a frontier from checkpoint lines, preserving order
    ///
    /// Lines that are not canonical crawl URLs are dropped with a warning, and
    /// repeated lines collapse to their first occurrence.
    pub fn restore<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut frontier = Self::new();
        for line in lines {
            let line = line.as_ref();
            match CanonicalUrl::parse(line) {
                Ok(url) => {
                    if frontier.seen.insert(url.clone()) {
                        frontier.queue.push_back(url);
                    }
                }
                Err(e) => {
                    tracing::warn!("Dropping invalid frontier entry {:?}: {}", line, e);
                }
            }
        }
        frontier
    }

    /// Seeds an empty frontier
    ///
    /// Does nothing if the frontier already holds work (a resumed crawl keeps
    /// its saved queue). Each seed must be a valid in-scope URL that is not
    /// already indexed; any other seed is skipped with a diagnostic.
    ///
    /// Returns the number of seeds enqueued.
    pub fn seed<S: AsRef<str>>(
        &mut self,
        seeds: &[S],
        host_filter: &str,
        index: &impl IndexStore,
    ) -> usize {
        if !self.queue.is_empty() {
            tracing::info!(
                "Resuming with {} queued URLs; seeds ignored",
                self.queue.len()
            );
            return 0;
        }

        tracing::info!("Frontier is empty. Seeding with {} URLs", seeds.len());
        let mut added = 0;
        for seed in seeds {
            let seed = seed.as_ref();
            let url = match CanonicalUrl::parse(seed) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping invalid seed URL {}: {}", seed, e);
                    continue;
                }
            };

            if !is_in_scope(&url, host_filter) {
                tracing::warn!(
                    "Skipping seed URL {}: outside host filter '{}' or not HTML",
                    url,
                    host_filter
                );
                continue;
            }

            match self.try_enqueue(url.clone(), index) {
                EnqueueOutcome::Enqueued => {
                    tracing::info!("Added seed URL to queue: {}", url);
                    added += 1;
                }
                EnqueueOutcome::Skipped => {
                    tracing::info!("Skipping already processed seed URL: {}", url);
                }
            }
        }
        added
    }

    /// Offers a URL to the queue
    ///
    /// This is the single dedup gate for newly discovered links: the URL is
    /// enqueued iff it was not enqueued earlier in this session and is not in
    /// the persistent index.
    pub fn try_enqueue(&mut self, url: CanonicalUrl, index: &impl IndexStore) -> EnqueueOutcome {
        if self.seen.contains(&url) || index.contains(url.as_str()) {
            return EnqueueOutcome::Skipped;
        }

        self.seen.insert(url.clone());
        self.queue.push_back(url);
        EnqueueOutcome::Enqueued
    }

    /// Pops up to `max` URLs from the head of the queue
    ///
    /// Popped URLs stay in the session seen-set.
    pub fn dequeue(&mut self, max: usize) -> Vec<CanonicalUrl> {
        let count = max.min(self.queue.len());
        self.queue.drain(..count).collect()
    }

    /// Current queue contents, head first
    pub fn snapshot(&self) -> Vec<String> {
        self.queue.iter().map(|u| u.as_str().to_string()).collect()
    }

    /// Returns true if `url` was enqueued at any point this session
    pub fn has_seen(&self, url: &CanonicalUrl) -> bool {
        self.seen.contains(url)
    }

    /// Number of queued URLs
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs enqueued this session
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
