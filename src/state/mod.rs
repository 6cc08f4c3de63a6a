//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `Frontier`: the FIFO work queue plus the set of URLs enqueued this session
//! - `CrawlPhase`: the orchestrator's Idle / Draining / Terminated state machine

mod frontier;
mod phase;

// Re-export main types
pub use frontier::{EnqueueOutcome, Frontier};
pub use phase::CrawlPhase;
