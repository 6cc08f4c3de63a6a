//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Restoring the frontier checkpoint and seeding an empty frontier
//! - Dispatching queued URLs to a bounded pool of worker tasks
//! - Checkpointing the frontier after every step
//! - Stopping when the work runs out or a shutdown signal arrives

use crate::config::Config;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::worker::{process_url, PageOutcome, WorkerContext};
use crate::crawler::build_http_client;
use crate::output::CrawlSummary;
use crate::state::{CrawlPhase, Frontier};
use crate::storage::{load_frontier, save_frontier, ContentStore, CsvIndex};
use crate::SieveError;
use std::future::Future;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    scheduler: Arc<Scheduler>,
    context: WorkerContext,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Opens the content directory (the only fatal storage step), loads the
    /// index, restores the saved frontier unless `fresh` is set, and seeds the
    /// frontier if it came back empty.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fresh` - Ignore the saved frontier; the index is still honoured
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SieveError)` - The content directory or HTTP client could not be set up
    pub fn new(config: Config, fresh: bool) -> Result<Self, SieveError> {
        let store = ContentStore::open(&config.output.content_dir)?;
        let index = CsvIndex::open(&config.output.index_path);

        let frontier = if fresh {
            tracing::info!("Ignoring saved frontier (fresh start)");
            Frontier::new()
        } else {
            let saved = load_frontier(&config.output.frontier_path);
            let frontier = Frontier::restore(saved);
            if !frontier.is_empty() {
                tracing::info!(
                    "Restored {} queued URLs from {}",
                    frontier.len(),
                    config.output.frontier_path.display()
                );
            }
            frontier
        };

        let scheduler = Arc::new(Scheduler::new(
            frontier,
            index,
            store,
            &config.crawler.host_filter,
        ));
        scheduler.seed(&config.crawler.seeds);

        let client = build_http_client(&config)?;
        let context = WorkerContext {
            scheduler: Arc::clone(&scheduler),
            client,
            request_delay: config.crawler.request_delay(),
        };

        Ok(Self {
            config: Arc::new(config),
            scheduler,
            context,
        })
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Runs until the frontier is exhausted or Ctrl-C is pressed
    pub async fn run(&self) -> Result<CrawlSummary, SieveError> {
        self.run_until(shutdown_signal()).await
    }

    /// Runs until the frontier is exhausted or `shutdown` completes
    ///
    /// On shutdown no further URLs are dispatched, in-flight workers are
    /// awaited, and the frontier is checkpointed once more so the next run
    /// resumes with whatever is still queued.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<CrawlSummary, SieveError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let workers = self.config.crawler.workers as usize;
        let mut tasks: JoinSet<PageOutcome> = JoinSet::new();
        let mut phase = CrawlPhase::Idle;
        let mut summary = CrawlSummary::default();

        tracing::info!(
            "Starting crawl: {} queued, {} already indexed, {} workers",
            self.scheduler.queued(),
            self.scheduler.indexed(),
            workers
        );

        loop {
            let capacity = workers.saturating_sub(tasks.len());
            for url in self.scheduler.take_batch(capacity) {
                let context = self.context.clone();
                tasks.spawn(async move { process_url(&context, url).await });
            }

            self.checkpoint();

            phase = phase.observe(self.scheduler.queued(), tasks.len());
            if !phase.is_active() {
                tracing::info!("Frontier is empty and no work in flight, crawl complete");
                break;
            }

            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    tracing::info!(
                        "Shutdown requested; waiting for {} in-flight pages",
                        tasks.len()
                    );
                    summary.interrupted = true;
                    break;
                }
                Some(joined) = tasks.join_next() => tally(&mut summary, joined),
                _ = self.scheduler.work_ready() => {}
            }
        }

        while let Some(joined) = tasks.join_next().await {
            tally(&mut summary, joined);
        }
        phase = phase.terminate();

        self.checkpoint();
        summary.last_index = self.scheduler.last_index();

        tracing::debug!("Crawl phase: {}", phase);
        summary.log();
        Ok(summary)
    }

    /// Writes the current frontier to the checkpoint file
    ///
    /// A failed checkpoint is logged and the crawl continues; the previous
    /// checkpoint stays intact because writes go through a temp file.
    fn checkpoint(&self) {
        let path = &self.config.output.frontier_path;
        let urls = self.scheduler.snapshot();

        if let Err(e) = save_frontier(path, &urls) {
            tracing::error!("Failed to checkpoint frontier to {}: {}", path.display(), e);
        }
    }
}

fn tally(summary: &mut CrawlSummary, joined: Result<PageOutcome, JoinError>) {
    match joined {
        Ok(outcome) => summary.record(outcome),
        Err(e) => tracing::error!("Worker task failed: {}", e),
    }
}

/// Resolves on Ctrl-C
///
/// If the signal handler cannot be installed the crawl simply runs to
/// completion.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Runs a complete crawl with the given configuration
pub async fn run_crawl(config: Config, fresh: bool) -> Result<CrawlSummary, SieveError> {
    let coordinator = Coordinator::new(config, fresh)?;
    coordinator.run().await
}
