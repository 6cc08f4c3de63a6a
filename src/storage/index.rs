//! CSV-backed persistent index
//!
//! The file has a single header row (`index,path,url`) followed by one row per
//! stored page. Rows are only ever appended.

use crate::storage::traits::{IndexStore, StorageError, StorageResult};
use crate::storage::IndexRecord;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Persistent index stored as an append-only CSV file
///
/// The whole file is read once when opened; membership tests are then answered
/// from memory and kept in step with every successful append.
#[derive(Debug)]
pub struct CsvIndex {
    path: PathBuf,
    urls: HashSet<String>,
    max_index: u64,
}

impl CsvIndex {
    /// Opens the index at `path`, reading every existing record
    ///
    /// Reads fail open: a missing, empty or unreadable file is treated as an
    /// empty index, and malformed rows are skipped. Reprocessing a page is
    /// preferred over silently treating it as done.
    pub fn open(path: &Path) -> Self {
        let mut index = Self {
            path: path.to_path_buf(),
            urls: HashSet::new(),
            max_index: 0,
        };

        match index.load() {
            Ok(count) => {
                if count > 0 {
                    tracing::info!(
                        "Loaded {} index records from {} (highest index {})",
                        count,
                        path.display(),
                        index.max_index
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read index {}: {}. Assuming nothing is indexed",
                    path.display(),
                    e
                );
                index.urls.clear();
                index.max_index = 0;
            }
        }

        index
    }

    /// Path of the backing CSV file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&mut self) -> StorageResult<usize> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut count = 0;
        for (row, result) in reader.deserialize::<IndexRecord>().enumerate() {
            match result {
                Ok(record) => {
                    self.max_index = self.max_index.max(record.index);
                    self.urls.insert(record.url);
                    count += 1;
                }
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed row {} in {}: {}",
                        row + 2,
                        self.path.display(),
                        e
                    );
                }
            }
        }

        Ok(count)
    }

    /// True if the file is absent or has no bytes yet, so a header is needed
    fn needs_header(&self) -> StorageResult<bool> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }
}

impl IndexStore for CsvIndex {
    fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    fn max_index(&self) -> u64 {
        self.max_index
    }

    fn len(&self) -> usize {
        self.urls.len()
    }

    fn append(&mut self, record: IndexRecord) -> StorageResult<()> {
        if self.urls.contains(&record.url) {
            return Err(StorageError::Duplicate(record.url));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let write_header = self.needs_header()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(&record)?;
        writer.flush()?;

        self.max_index = self.max_index.max(record.index);
        self.urls.insert(record.url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(index: u64, url: &str) -> IndexRecord {
        IndexRecord {
            index,
            path: format!("files/{}.txt", index),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let index = CsvIndex::open(&dir.path().join("index.csv"));
        assert!(index.is_empty());
        assert_eq!(index.max_index(), 0);
        assert!(!index.contains("https://example.org/"));
    }

    #[test]
    fn test_empty_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");
        fs::write(&path, "").unwrap();

        let index = CsvIndex::open(&path);
        assert!(index.is_empty());
        assert_eq!(index.max_index(), 0);
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");

        let mut index = CsvIndex::open(&path);
        index.append(record(1, "https://example.org/")).unwrap();
        index.append(record(2, "https://example.org/about")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "index,path,url\n\
             1,files/1.txt,https://example.org/\n\
             2,files/2.txt,https://example.org/about\n"
        );
    }

    #[test]
    fn test_reload_restores_membership_and_max() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");

        {
            let mut index = CsvIndex::open(&path);
            index.append(record(3, "https://example.org/a")).unwrap();
            index.append(record(7, "https://example.org/b")).unwrap();
        }

        let index = CsvIndex::open(&path);
        assert_eq!(index.len(), 2);
        assert_eq!(index.max_index(), 7);
        assert!(index.contains("https://example.org/a"));
        assert!(index.contains("https://example.org/b"));
        assert!(!index.contains("https://example.org/c"));
    }

    #[test]
    fn test_duplicate_append_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");

        let mut index = CsvIndex::open(&path);
        index.append(record(1, "https://example.org/")).unwrap();
        let result = index.append(record(2, "https://example.org/"));

        assert!(matches!(result, Err(StorageError::Duplicate(_))));
        assert_eq!(index.len(), 1);
        assert_eq!(index.max_index(), 1);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");
        fs::write(
            &path,
            "index,path,url\n\
             1,files/1.txt,https://example.org/\n\
             oops,files/x.txt,https://example.org/bad\n\
             4,files/4.txt,https://example.org/four\n",
        )
        .unwrap();

        let index = CsvIndex::open(&path);
        assert_eq!(index.len(), 2);
        assert_eq!(index.max_index(), 4);
        assert!(!index.contains("https://example.org/bad"));
    }

    #[test]
    fn test_unreadable_index_fails_open() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a CSV file
        let path = dir.path().join("index.csv");
        fs::create_dir(&path).unwrap();

        let index = CsvIndex::open(&path);
        assert!(index.is_empty());
        assert!(!index.contains("https://example.org/"));
    }

    #[test]
    fn test_append_to_unwritable_path_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");
        fs::create_dir(&path).unwrap();

        let mut index = CsvIndex::open(&path);
        let result = index.append(record(1, "https://example.org/"));

        assert!(result.is_err());
        assert!(!index.contains("https://example.org/"));
    }

    #[test]
    fn test_append_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("index.csv");

        let mut index = CsvIndex::open(&path);
        index.append(record(1, "https://example.org/")).unwrap();
        assert!(path.exists());
    }
}
