use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Sieve-Crawl
///
/// Immutable for the lifetime of a crawl.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Substring the host of every crawled URL must contain
    #[serde(rename = "host-filter")]
    pub host_filter: String,

    /// Starting URLs, used only when the saved frontier is empty
    pub seeds: Vec<String>,

    /// Maximum number of concurrent page fetches
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "fetch-timeout", default = "default_fetch_timeout")]
    pub fetch_timeout: u64,

    /// Pause a worker takes after each fetch (milliseconds)
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: u64,
}

impl CrawlerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Output file locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV index of stored pages
    #[serde(rename = "index-path", default = "default_index_path")]
    pub index_path: PathBuf,

    /// Directory holding one text file per stored page
    #[serde(rename = "content-dir", default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Path to the frontier checkpoint (one URL per line)
    #[serde(rename = "frontier-path", default = "default_frontier_path")]
    pub frontier_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            content_dir: default_content_dir(),
            frontier_path: default_frontier_path(),
        }
    }
}

fn default_workers() -> u32 {
    10
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_request_delay() -> u64 {
    100
}

fn default_crawler_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_index_path() -> PathBuf {
    PathBuf::from("index.csv")
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("files")
}

fn default_frontier_path() -> PathBuf {
    PathBuf::from("crawl_queue.txt")
}
