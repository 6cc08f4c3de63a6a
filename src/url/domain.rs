use url::Url;

/// Extracts the host from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// The port is not part of the host.
///
/// # Arguments
///
/// * `url` - The URL to extract the host from
///
/// # Returns
///
/// * `Some(String)` - The lowercase host
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sieve_crawl::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.org:8080/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.org".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}
