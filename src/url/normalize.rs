use crate::url::CanonicalUrl;
use crate::{UrlError, UrlResult};
use url::Url;

/// Href prefixes that never point at a crawlable page
const EXCLUDED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "#"];

/// Normalizes a hyperlink found on `base` into a canonical URL
///
/// This is a filtering step: any href that cannot become a canonical crawl
/// URL yields `None`.
///
/// # Normalization Steps
///
/// 1. Trim the href; reject it if empty or if it starts with `javascript:`,
///    `mailto:`, `tel:` or `#`
/// 2. Resolve it against the base (relative, scheme-relative or absolute)
/// 3. Reject schemes other than http/https and URLs without a host
/// 4. Drop the query string and fragment
/// 5. Remove trailing slashes unless the path is the root `/`
///
/// # Examples
///
/// ```
/// use sieve_crawl::url::{normalize_link, CanonicalUrl};
///
/// let base = CanonicalUrl::parse("https://example.org/").unwrap();
/// let url = normalize_link("/about?x=1#foo", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.org/about");
///
/// assert!(normalize_link("javascript:void(0)", &base).is_none());
/// ```
pub fn normalize_link(href: &str, base: &CanonicalUrl) -> Option<CanonicalUrl> {
    match resolve_link(href, base.as_url()) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::trace!("Rejected link {:?} on {}: {}", href, base, e);
            None
        }
    }
}

/// Resolves an href against a base URL, reporting why it was rejected
pub fn resolve_link(href: &str, base: &Url) -> UrlResult<CanonicalUrl> {
    let href = href.trim();

    if href.is_empty() {
        return Err(UrlError::Excluded("empty href".to_string()));
    }

    if let Some(prefix) = EXCLUDED_PREFIXES
        .iter()
        .find(|prefix| starts_with_ignore_case(href, prefix))
    {
        return Err(UrlError::Excluded(format!("{} link", prefix)));
    }

    let joined = base.join(href).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(joined)
}

/// Canonicalizes an absolute URL string
pub(crate) fn canonicalize_str(raw: &str) -> UrlResult<CanonicalUrl> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    canonicalize(url)
}

/// Applies the canonical form to a parsed absolute URL
fn canonicalize(mut url: Url) -> UrlResult<CanonicalUrl> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_query(None);
    url.set_fragment(None);

    let trimmed = url.path().trim_end_matches('/');
    if trimmed.len() != url.path().len() {
        // An all-slash path collapses to the root
        let path = if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
        url.set_path(&path);
    }

    Ok(CanonicalUrl(url))
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
