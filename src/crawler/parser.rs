//! HTML content extraction
//!
//! This module reduces an HTML document to:
//! - Its readable text (script and style content removed)
//! - The set of in-scope links to follow
//! - The page title, for logging

use crate::url::{is_in_scope, normalize_link, CanonicalUrl};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;

/// Elements whose text is never part of the page content
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    /// The page title (from the <title> tag)
    pub title: Option<String>,

    /// Readable text, one non-empty fragment per line
    pub text: String,

    /// In-scope candidate links, deduplicated
    pub links: BTreeSet<CanonicalUrl>,
}

/// Parses HTML and extracts text and in-scope links
///
/// # Link Extraction Rules
///
/// Every `<a href="...">` is normalized against `page_url` and kept only if
/// it is in scope for `host_filter`. The result is a set, so a link repeated
/// on one page yields a single candidate.
///
/// # Example
///
/// ```
/// use sieve_crawl::crawler::extract_page;
/// use sieve_crawl::url::CanonicalUrl;
///
/// let html = r#"<html><body><p>Hello</p><a href="/next"></a><a href="https://other.net/"></a></body></html>"#;
/// let page_url = CanonicalUrl::parse("https://example.org/").unwrap();
/// let page = extract_page(html, &page_url, "example.org");
///
/// assert_eq!(page.text, "Hello");
/// assert_eq!(page.links.len(), 1);
/// ```
pub fn extract_page(html: &str, page_url: &CanonicalUrl, host_filter: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        title: extract_title(&document),
        text: extract_text(&document),
        links: extract_links(&document, page_url, host_filter),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts readable text from the document
///
/// All text outside `<script>` and `<style>` is concatenated, split into
/// lines, and each line is further split on double spaces. Fragments are
/// trimmed, empty ones dropped, and the rest joined with `\n`.
pub fn extract_text(document: &Html) -> String {
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    clean_text(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapses raw document text into one fragment per line
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts all in-scope links from the document
fn extract_links(document: &Html, page_url: &CanonicalUrl, host_filter: &str) -> BTreeSet<CanonicalUrl> {
    let mut links = BTreeSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            match normalize_link(href, page_url) {
                Some(url) if is_in_scope(&url, host_filter) => {
                    links.insert(url);
                }
                _ => {}
            }
        }
    }

    links
}
