//! URL handling module for Sieve-Crawl
//!
//! This module provides the canonical URL type used as the identity key for
//! every page, link normalization, and the host/type scope filter.

mod domain;
mod filter;
mod normalize;

use crate::UrlResult;
use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::extract_host;
pub use filter::{host_matches, is_in_scope, is_likely_html};
pub use normalize::{normalize_link, resolve_link};

/// A normalized absolute crawl URL
///
/// Invariants: scheme is `http` or `https`, the host is non-empty, there is no
/// query and no fragment, and the path carries no trailing slash unless it is
/// the root path `/`.
///
/// Values can only be produced by [`CanonicalUrl::parse`] or by the link
/// normalizer, so every other component may rely on the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUrl(Url);

impl CanonicalUrl {
    /// Canonicalizes an absolute URL string
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_crawl::url::CanonicalUrl;
    ///
    /// let url = CanonicalUrl::parse("https://example.org/docs/?page=2#top").unwrap();
    /// assert_eq!(url.as_str(), "https://example.org/docs");
    ///
    /// assert!(CanonicalUrl::parse("ftp://example.org/file").is_err());
    /// ```
    pub fn parse(raw: &str) -> UrlResult<Self> {
        normalize::canonicalize_str(raw)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
