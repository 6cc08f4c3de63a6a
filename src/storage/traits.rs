//! Storage traits and error types
//!
//! This module defines the trait interface for the persistent page index and
//! the error type shared by every storage component.

use crate::storage::IndexRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("URL already indexed: {0}")]
    Duplicate(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable, append-only record of stored pages
///
/// The index is the source of truth for "already processed": once a URL has a
/// record, it must never be fetched or enqueued again, in this run or any
/// later run that reloads the index.
pub trait IndexStore {
    /// Returns true if `url` has a record
    fn contains(&self, url: &str) -> bool;

    /// Highest sequential index recorded so far, or 0 if there is none
    fn max_index(&self) -> u64;

    /// Number of records
    fn len(&self) -> usize;

    /// Returns true if the index holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Durably appends one record
    ///
    /// Fails with [`StorageError::Duplicate`] if the URL is already recorded.
    /// On any error the record is not considered stored.
    fn append(&mut self, record: IndexRecord) -> StorageResult<()>;
}
