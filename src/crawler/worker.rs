//! Per-URL worker procedure
//!
//! A worker takes one URL from the frontier through
//! skip-check → fetch → extract → record, then sleeps for the politeness
//! delay. Nothing here returns an error: every failure is logged and reported
//! as a [`PageOutcome`] so the coordinator can keep crawling.

use crate::crawler::parser::extract_page;
use crate::crawler::scheduler::{RecordOutcome, Scheduler};
use crate::crawler::{fetch_url, FetchResult};
use crate::url::CanonicalUrl;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// What happened to a dispatched URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page was stored under a new index
    Stored,
    /// URL was already indexed; nothing fetched
    AlreadyIndexed,
    /// Fetch failed; URL dropped for this run
    FetchFailed,
    /// Page fetched but could not be persisted
    StoreFailed,
}

/// Everything a worker task needs, cheap to clone into each task
#[derive(Clone)]
pub struct WorkerContext {
    pub scheduler: Arc<Scheduler>,
    pub client: Client,
    pub request_delay: Duration,
}

/// Processes one URL
pub async fn process_url(ctx: &WorkerContext, url: CanonicalUrl) -> PageOutcome {
    if ctx.scheduler.is_indexed(&url) {
        tracing::debug!("Already indexed, skipping: {}", url);
        return PageOutcome::AlreadyIndexed;
    }

    let outcome = fetch_and_record(ctx, &url).await;

    if !ctx.request_delay.is_zero() {
        tokio::time::sleep(ctx.request_delay).await;
    }

    outcome
}

async fn fetch_and_record(ctx: &WorkerContext, url: &CanonicalUrl) -> PageOutcome {
    let body = match fetch_url(&ctx.client, url.as_str()).await {
        FetchResult::Success {
            final_url,
            status_code,
            content_type,
            body,
        } => {
            tracing::debug!(
                "Fetched {} (HTTP {}, {}, {} bytes)",
                url,
                status_code,
                if content_type.is_empty() {
                    "no content type"
                } else {
                    content_type.as_str()
                },
                body.len()
            );
            if final_url != url.as_str() {
                tracing::debug!("{} redirected to {}", url, final_url);
            }
            body
        }
        FetchResult::HttpError { status_code } => {
            tracing::warn!("Failed to fetch {}: HTTP {}", url, status_code);
            return PageOutcome::FetchFailed;
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("Failed to fetch {}: {}", url, error);
            return PageOutcome::FetchFailed;
        }
    };

    let page = extract_page(&body, url, ctx.scheduler.host_filter());
    let link_count = page.links.len();

    match ctx.scheduler.record_page(url, &page.text, &page.links) {
        RecordOutcome::Stored {
            index,
            path,
            links_enqueued,
        } => {
            tracing::info!(
                "Stored {} as {} ({}; {} links, {} new)",
                url,
                path.display(),
                page.title.as_deref().unwrap_or("untitled"),
                link_count,
                links_enqueued
            );
            tracing::debug!("Assigned index {} to {}", index, url);
            PageOutcome::Stored
        }
        RecordOutcome::AlreadyIndexed => {
            tracing::debug!("Indexed by another worker meanwhile: {}", url);
            PageOutcome::AlreadyIndexed
        }
        RecordOutcome::Failed(e) => {
            tracing::error!("Failed to store {}: {}", url, e);
            PageOutcome::StoreFailed
        }
    }
}
