//! Storage module for persisting crawl data
//!
//! This module handles everything the crawler writes to disk:
//! - The append-only CSV index of stored pages
//! - The content directory holding one text file per stored page
//! - The frontier checkpoint used to resume an interrupted crawl

mod checkpoint;
mod content;
mod index;
mod traits;

pub use checkpoint::{load_frontier, save_frontier};
pub use content::ContentStore;
pub use index::CsvIndex;
pub use traits::{IndexStore, StorageError, StorageResult};

use serde::{Deserialize, Serialize};

/// One row of the persistent index
///
/// Created exactly once per successfully stored page and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Sequential index, also the content file name
    pub index: u64,

    /// Path of the content file
    pub path: String,

    /// Canonical URL of the page
    pub url: String,
}
