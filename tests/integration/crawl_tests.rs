//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end against files in a temporary directory.

use sieve_crawl::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use sieve_crawl::crawler::Coordinator;
use sieve_crawl::storage::{load_frontier, CsvIndex, IndexStore};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the mock server from `seeds`
fn create_test_config(dir: &Path, seeds: Vec<String>, workers: u32, request_delay: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            host_filter: "127.0.0.1".to_string(),
            seeds,
            workers,
            fetch_timeout: 5,
            request_delay,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
        },
        output: OutputConfig {
            index_path: dir.join("index.csv"),
            content_dir: dir.join("files"),
            frontier_path: dir.join("crawl_queue.txt"),
        },
    }
}

/// Reads the `url` column of every index row
fn indexed_urls(dir: &Path) -> Vec<String> {
    let content = fs::read_to_string(dir.join("index.csv")).unwrap_or_default();
    content
        .lines()
        .skip(1)
        .filter_map(|line| line.rsplit(',').next())
        .map(str::to_string)
        .collect()
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{}/page1">Page 1</a>
            <a href="/page2/">Page 2</a>
            <a href="page1#section">Page 1 again</a>
            <a href="mailto:someone@example.org">Mail</a>
            <a href="/report.pdf">Report</a>
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_page(
            r#"<html><body>Content 1 <a href="/">Home</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_page(
            r#"<html><body>Content 2 <a href="/page1?ref=2">Page 1</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), vec![base_url.clone()], 4, 0);

    let coordinator = Coordinator::new(config, false).expect("Failed to create coordinator");
    let summary = coordinator
        .run_until(std::future::pending())
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_stored, 3);
    assert_eq!(summary.fetch_failures, 0);
    assert!(!summary.interrupted);

    let mut urls = indexed_urls(dir.path());
    urls.sort();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );

    for index in 1..=3 {
        assert!(dir.path().join("files").join(format!("{}.txt", index)).exists());
    }
    assert!(load_frontier(&dir.path().join("crawl_queue.txt")).is_empty());
}

#[tokio::test]
async fn test_single_page_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><p>Hello</p><a href="/next"></a><a href="https://elsewhere.example/"></a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Never reached: the crawl is stopped while the only worker is
    // still in its politeness delay after the first page
    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(html_page("<p>Next</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), vec![base_url.clone()], 1, 500);
    let coordinator = Coordinator::new(config, false).expect("Failed to create coordinator");

    let first_page = dir.path().join("files").join("1.txt");
    let shutdown = async move {
        while !first_page.exists() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };

    let summary = tokio::time::timeout(Duration::from_secs(10), coordinator.run_until(shutdown))
        .await
        .expect("crawl did not stop")
        .expect("Crawl failed");

    assert!(summary.interrupted);
    assert_eq!(summary.pages_stored, 1);

    let text = fs::read_to_string(dir.path().join("files").join("1.txt")).unwrap();
    assert_eq!(text, "Hello");

    assert_eq!(indexed_urls(dir.path()), vec![format!("{}/", base_url)]);

    let index = CsvIndex::open(&dir.path().join("index.csv"));
    assert_eq!(index.max_index(), 1);

    assert_eq!(
        load_frontier(&dir.path().join("crawl_queue.txt")),
        vec![format!("{}/next", base_url)]
    );
}

#[tokio::test]
async fn test_restart_skips_indexed_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(html_page("<p>Should not be fetched</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("index.csv"),
        format!("index,path,url\n1,files/1.txt,{}/\n", base_url),
    )
    .unwrap();

    let config = create_test_config(dir.path(), vec![base_url.clone()], 2, 0);
    let coordinator = Coordinator::new(config, false).expect("Failed to create coordinator");
    let summary = coordinator
        .run_until(std::future::pending())
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_stored, 0);
    assert_eq!(summary.last_index, 1);
    assert_eq!(indexed_urls(dir.path()).len(), 1);
}

#[tokio::test]
async fn test_resume_from_checkpoint_continues_numbering() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Indexed on the previous run, but still listed in the checkpoint
    Mock::given(method("GET"))
        .and(path("/done"))
        .respond_with(html_page("<p>done</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/todo"))
        .respond_with(html_page(r#"<p>todo</p><a href="/done">back</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("index.csv"),
        format!("index,path,url\n7,files/7.txt,{}/done\n", base_url),
    )
    .unwrap();
    fs::write(
        dir.path().join("crawl_queue.txt"),
        format!("{0}/done\n{0}/todo\n", base_url),
    )
    .unwrap();

    // The seed is ignored because the checkpoint is not empty
    let config = create_test_config(dir.path(), vec![format!("{}/seed", base_url)], 2, 0);
    let coordinator = Coordinator::new(config, false).expect("Failed to create coordinator");
    let summary = coordinator
        .run_until(std::future::pending())
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_stored, 1);
    assert_eq!(summary.already_indexed, 1);
    assert_eq!(summary.last_index, 8);
    assert!(dir.path().join("files").join("8.txt").exists());
    assert_eq!(
        indexed_urls(dir.path()),
        vec![format!("{}/done", base_url), format!("{}/todo", base_url)]
    );
}

#[tokio::test]
async fn test_failed_fetch_is_dropped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path(), vec![base_url], 1, 0);
    let coordinator = Coordinator::new(config, false).expect("Failed to create coordinator");
    let summary = coordinator
        .run_until(std::future::pending())
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_stored, 0);
    assert_eq!(summary.fetch_failures, 1);
    assert!(indexed_urls(dir.path()).is_empty());
    assert!(load_frontier(&dir.path().join("crawl_queue.txt")).is_empty());
}

#[tokio::test]
async fn test_fresh_start_keeps_index() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("<p>home</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stale"))
        .respond_with(html_page("<p>stale</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("crawl_queue.txt"),
        format!("{}/stale\n", base_url),
    )
    .unwrap();

    let config = create_test_config(dir.path(), vec![base_url.clone()], 1, 0);
    let coordinator = Coordinator::new(config, true).expect("Failed to create coordinator");
    let summary = coordinator
        .run_until(std::future::pending())
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_stored, 1);
    assert_eq!(indexed_urls(dir.path()), vec![format!("{}/", base_url)]);
}
