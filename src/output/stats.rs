//! Statistics from the files a crawl leaves behind
//!
//! Reads the index, the frontier checkpoint and the content directory without
//! modifying any of them.

use crate::config::Config;
use crate::storage::{load_frontier, ContentStore, CsvIndex, IndexStore};
use crate::SieveError;

/// Snapshot of crawl progress on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of records in the index
    pub indexed_pages: usize,

    /// Highest index recorded (0 if none)
    pub highest_index: u64,

    /// URLs waiting in the frontier checkpoint
    pub queued_urls: usize,

    /// Content files present in the content directory
    pub content_files: usize,
}

/// Loads statistics for the crawl described by `config`
pub fn load_statistics(config: &Config) -> Result<CrawlStatistics, SieveError> {
    let index = CsvIndex::open(&config.output.index_path);
    let queued_urls = load_frontier(&config.output.frontier_path).len();

    // Opening the store would create the directory; only count what exists
    let content_files = if config.output.content_dir.is_dir() {
        ContentStore::open(&config.output.content_dir)?.count_files()?
    } else {
        0
    };

    Ok(CrawlStatistics {
        indexed_pages: index.len(),
        highest_index: index.max_index(),
        queued_urls,
        content_files,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Index:");
    println!("  Indexed pages: {}", stats.indexed_pages);
    println!("  Highest index: {}", stats.highest_index);
    println!();

    println!("Content:");
    println!("  Content files: {}", stats.content_files);
    if stats.content_files > stats.indexed_pages {
        println!(
            "  Note: {} content files without an index record",
            stats.content_files - stats.indexed_pages
        );
    }
    println!();

    println!("Frontier:");
    println!("  Queued URLs: {}", stats.queued_urls);

    if stats.queued_urls == 0 {
        println!("\nNo saved work; the next run starts from the seeds.");
    } else {
        println!("\nThe next run resumes from the saved frontier.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        let root = dir.path().display();
        parse_config(&format!(
            r#"
[crawler]
host-filter = "example.org"
seeds = ["https://example.org"]

[output]
index-path = "{root}/index.csv"
content-dir = "{root}/files"
frontier-path = "{root}/queue.txt"
"#
        ))
        .unwrap()
    }

    #[test]
    fn test_statistics_of_empty_crawl() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let stats = load_statistics(&config).unwrap();
        assert_eq!(
            stats,
            CrawlStatistics {
                indexed_pages: 0,
                highest_index: 0,
                queued_urls: 0,
                content_files: 0,
            }
        );
        assert!(!dir.path().join("files").exists());
    }

    #[test]
    fn test_statistics_from_files() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        fs::write(
            dir.path().join("index.csv"),
            "index,path,url\n1,files/1.txt,https://example.org/\n5,files/5.txt,https://example.org/a\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("files")).unwrap();
        fs::write(dir.path().join("files").join("1.txt"), "x").unwrap();
        fs::write(dir.path().join("files").join("5.txt"), "y").unwrap();
        fs::write(
            dir.path().join("queue.txt"),
            "https://example.org/b\nhttps://example.org/c\n",
        )
        .unwrap();

        let stats = load_statistics(&config).unwrap();
        assert_eq!(stats.indexed_pages, 2);
        assert_eq!(stats.highest_index, 5);
        assert_eq!(stats.queued_urls, 2);
        assert_eq!(stats.content_files, 2);
    }
}
