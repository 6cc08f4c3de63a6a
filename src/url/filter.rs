use crate::url::{extract_host, CanonicalUrl};
use url::Url;

/// File extensions that are assumed not to be HTML pages
const NON_HTML_EXTENSIONS: &[&str] = &[
    // Images
    "jpg", "jpeg", "png", "gif", "bmp", "svg", "webp",
    // Documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "ppts", "psd", "rdf", "m4v",
    // Archives
    "zip", "rar", "gz", "tar", "7z",
    // Stylesheets and scripts
    "css", "js",
    // Data formats
    "xml", "json", "csv", "txt",
    // Media
    "mp3", "mp4", "avi", "mov", "wav",
    // Executables and disk images
    "exe", "dmg", "iso",
];

/// Decides whether a canonical URL belongs to the crawl
///
/// True iff the lowercased host contains the lowercased `host_substring` and
/// the URL is likely an HTML page.
///
/// # Examples
///
/// ```
/// use sieve_crawl::url::{is_in_scope, CanonicalUrl};
///
/// let page = CanonicalUrl::parse("https://sub.example.org/page").unwrap();
/// assert!(is_in_scope(&page, "example.org"));
///
/// let logo = CanonicalUrl::parse("https://example.org/logo.png").unwrap();
/// assert!(!is_in_scope(&logo, "example.org"));
/// ```
pub fn is_in_scope(url: &CanonicalUrl, host_substring: &str) -> bool {
    host_matches(url.as_url(), host_substring) && is_likely_html(url.as_url())
}

/// Case-insensitive substring match on the URL host
pub fn host_matches(url: &Url, host_substring: &str) -> bool {
    match extract_host(url) {
        Some(host) => host.contains(&host_substring.to_lowercase()),
        None => false,
    }
}

/// Guesses from the path extension whether a URL points at an HTML page
///
/// The root path is always treated as HTML. Otherwise the text after the last
/// `.` of the final path segment is compared, case-insensitively, against a
/// denylist of non-HTML extensions. No extension, or an unknown one (such as
/// `.php`), counts as HTML.
pub fn is_likely_html(url: &Url) -> bool {
    let path = url.path();
    if path.is_empty() || path == "/" {
        return true;
    }

    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((_, extension)) => {
            let extension = extension.to_lowercase();
            !NON_HTML_EXTENSIONS.contains(&extension.as_str())
        }
        None => true,
    }
}
