//! Scheduler: the crawl's single mutual-exclusion domain
//!
//! This module owns all state shared between workers:
//! - The frontier queue and the session seen-set
//! - The sequential index counter
//! - The persistent index and the content store
//!
//! Every operation on that state runs under one lock, so dequeue, enqueue,
//! seen-set insertion, counter increment and the index's insert-if-absent are
//! indivisible relative to each other. The lock is never held across an
//! `.await`.

use crate::state::{EnqueueOutcome, Frontier};
use crate::storage::{ContentStore, CsvIndex, IndexRecord, IndexStore, StorageError};
use crate::url::CanonicalUrl;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Notify;

/// Result of trying to store a fetched page
#[derive(Debug)]
pub enum RecordOutcome {
    /// Content file and index record were written
    Stored {
        /// Sequential index assigned to the page
        index: u64,
        /// Content file path
        path: PathBuf,
        /// Number of discovered links that entered the frontier
        links_enqueued: usize,
    },

    /// Another worker (or an earlier run) already stored this URL
    AlreadyIndexed,

    /// Writing the content file or the index record failed
    Failed(StorageError),
}

struct SchedulerState {
    frontier: Frontier,
    index: CsvIndex,
    store: ContentStore,
    next_index: u64,
}

/// Shared crawl state behind a single lock
pub struct Scheduler {
    state: Mutex<SchedulerState>,
    work_ready: Notify,
    host_filter: String,
}

impl Scheduler {
    /// Creates a scheduler over restored state
    ///
    /// The index counter starts one past the highest recorded index, so a
    /// fresh crawl numbers its first page 1 and indices are never reused.
    pub fn new(frontier: Frontier, index: CsvIndex, store: ContentStore, host_filter: &str) -> Self {
        let next_index = index.max_index() + 1;

        Self {
            state: Mutex::new(SchedulerState {
                frontier,
                index,
                store,
                next_index,
            }),
            work_ready: Notify::new(),
            host_filter: host_filter.to_string(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerState> {
        // A worker that panicked mid-operation leaves the state as consistent
        // as the last completed step; keep crawling with it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn host_filter(&self) -> &str {
        &self.host_filter
    }

    /// Seeds the frontier if it is empty; returns the number of seeds added
    pub fn seed<S: AsRef<str>>(&self, seeds: &[S]) -> usize {
        let mut state = self.lock();
        let SchedulerState {
            frontier, index, ..
        } = &mut *state;
        frontier.seed(seeds, &self.host_filter, &*index)
    }

    /// Returns true if the URL already has an index record
    pub fn is_indexed(&self, url: &CanonicalUrl) -> bool {
        self.lock().index.contains(url.as_str())
    }

    /// Pops up to `max` URLs for dispatch
    pub fn take_batch(&self, max: usize) -> Vec<CanonicalUrl> {
        if max == 0 {
            return Vec::new();
        }
        self.lock().frontier.dequeue(max)
    }

    /// Stores a fetched page and enqueues its links
    ///
    /// This is the insert-if-absent operation: the index is re-checked, a
    /// fresh sequential index is allocated, the content file is written, then
    /// the index record is appended. Links are offered to the frontier only
    /// once the record is durable, so a page that failed to store is never
    /// explored from.
    pub fn record_page(
        &self,
        url: &CanonicalUrl,
        text: &str,
        links: &BTreeSet<CanonicalUrl>,
    ) -> RecordOutcome {
        let mut state = self.lock();

        if state.index.contains(url.as_str()) {
            return RecordOutcome::AlreadyIndexed;
        }

        let index = state.next_index;
        state.next_index += 1;

        let path = match state.store.write(index, text) {
            Ok(path) => path,
            Err(e) => return RecordOutcome::Failed(e),
        };

        let record = IndexRecord {
            index,
            path: path.to_string_lossy().into_owned(),
            url: url.as_str().to_string(),
        };
        if let Err(e) = state.index.append(record) {
            return RecordOutcome::Failed(e);
        }

        let SchedulerState {
            frontier, index: page_index, ..
        } = &mut *state;
        let mut links_enqueued = 0;
        for link in links {
            if frontier.try_enqueue(link.clone(), &*page_index) == EnqueueOutcome::Enqueued {
                links_enqueued += 1;
            }
        }
        drop(state);

        if links_enqueued > 0 {
            self.work_ready.notify_one();
        }

        RecordOutcome::Stored {
            index,
            path,
            links_enqueued,
        }
    }

    /// Waits until a worker signals that new work was enqueued
    pub async fn work_ready(&self) {
        self.work_ready.notified().await
    }

    /// Current frontier contents, head first
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().frontier.snapshot()
    }

    /// Number of queued URLs
    pub fn queued(&self) -> usize {
        self.lock().frontier.len()
    }

    /// Number of records in the persistent index
    pub fn indexed(&self) -> usize {
        self.lock().index.len()
    }

    /// Highest index handed out so far (0 if none)
    pub fn last_index(&self) -> u64 {
        self.lock().next_index - 1
    }
}
