//! Crawl orchestrator states

use std::fmt;

/// Represents the current phase of a crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// No queued work and no work in flight
    Idle,

    /// Queued work exists or workers are still running
    Draining,

    /// The session is over; no further transitions
    Terminated,
}

impl CrawlPhase {
    /// Computes the next phase from the current amount of work
    ///
    /// Terminated is absorbing. Otherwise the phase is Draining while either
    /// the frontier or the set of in-flight workers is nonempty, and Idle when
    /// both are empty at the same time.
    pub fn observe(self, queued: usize, in_flight: usize) -> Self {
        match self {
            Self::Terminated => Self::Terminated,
            _ if queued > 0 || in_flight > 0 => Self::Draining,
            _ => Self::Idle,
        }
    }

    /// Ends the session
    pub fn terminate(self) -> Self {
        Self::Terminated
    }

    /// Returns true if there is work left to do
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Draining)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Draining => "draining",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
