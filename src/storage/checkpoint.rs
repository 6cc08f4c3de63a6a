//! Frontier checkpoint file
//!
//! The checkpoint is plain UTF-8 text with one URL per line. Every save fully
//! replaces the previous contents.

use crate::storage::traits::StorageResult;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Loads the saved frontier, one URL per line
///
/// Blank lines are ignored. A missing file means there is no saved frontier;
/// an unreadable file is logged and treated the same way.
pub fn load_frontier(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::warn!(
                "Error loading frontier checkpoint {}: {}. Starting fresh",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// Atomically replaces the checkpoint with `urls`
///
/// The URLs are written to a sibling temporary file which is then renamed over
/// the checkpoint, so readers never observe a half-written queue.
pub fn save_frontier<I, S>(path: &Path, urls: I) -> StorageResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path);
    {
        let mut file = fs::File::create(&tmp_path)?;
        let mut buf = String::new();
        for url in urls {
            buf.push_str(url.as_ref());
            buf.push('\n');
        }
        file.write_all(buf.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
