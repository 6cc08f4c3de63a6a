use crate::storage::traits::{StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension used for content files
const CONTENT_EXTENSION: &str = "txt";

/// Flat directory holding the extracted text of every stored page
///
/// Each file is named after the page's sequential index and is written once.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    /// Opens the content directory, creating it if needed
    ///
    /// Failing to create the directory is the one storage error the crawl
    /// cannot continue from, so it is returned to the caller.
    pub fn open(dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the content file for `index`
    pub fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(format!("{}.{}", index, CONTENT_EXTENSION))
    }

    /// Writes the text for `index` and returns the file path
    pub fn write(&self, index: u64, text: &str) -> StorageResult<PathBuf> {
        let path = self.path_for(index);
        fs::write(&path, text)?;
        Ok(path)
    }

    /// Counts the content files currently on disk
    pub fn count_files(&self) -> StorageResult<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(CONTENT_EXTENSION) {
                count += 1;
            }
        }
        Ok(count)
    }
}
