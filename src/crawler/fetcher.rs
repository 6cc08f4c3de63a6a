//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests for page content
//! - Classifying failures (HTTP status, timeout, connection errors)
//!
//! Failures are never retried; the caller drops the URL for this run.

use crate::config::Config;
use reqwest::Client;
use std::time::Duration;

/// Upper bound on the TCP connect phase
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Server answered with an error status (4xx or 5xx)
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Request failed before a usable response arrived
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// The whole request (connect, headers and body) is bounded by the configured
/// fetch timeout. Redirects are followed with reqwest's default policy.
///
/// # Example
///
/// ```no_run
/// use sieve_crawl::config::parse_config;
/// use sieve_crawl::crawler::build_http_client;
///
/// let config = parse_config(r#"
/// [crawler]
/// host-filter = "example.org"
/// seeds = ["https://example.org"]
/// "#).unwrap();
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let timeout = config.crawler.fetch_timeout();

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx/3xx with readable body | `Success` |
/// | HTTP 4xx / 5xx | `HttpError` |
/// | Timeout | `NetworkError` ("Request timeout") |
/// | Connection refused / DNS | `NetworkError` ("Connection failed: ...") |
/// | Body cannot be read or decoded | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    tracing::debug!("Fetching: {}", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => classify_error(&e),
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}
