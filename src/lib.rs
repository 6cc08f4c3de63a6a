//! Sieve-Crawl: a resumable single-host crawler
//!
//! This crate crawls one host (selected by a host substring) starting from seed
//! URLs, stores the readable text of every page it visits as a numbered file,
//! and records each stored page in an append-only CSV index. The work queue is
//! checkpointed to disk so an interrupted crawl picks up where it stopped, and
//! the index guarantees that a page is never stored twice.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Sieve-Crawl operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Reasons a URL cannot become a canonical crawl URL
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Excluded link target: {0}")]
    Excluded(String),
}

/// Result type alias for Sieve-Crawl operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use state::{CrawlPhase, Frontier};
pub use crate::url::{is_in_scope, normalize_link, CanonicalUrl};
