//! HTML link extraction for the discovery crawl
//!
//! This module handles parsing HTML content to extract:
//! - Links to follow (`href` of every `<a>` and `<link>` element)
//! - Listing links (`<a href>` matching the property/listing keywords)

use crate::url::is_listing_link;
use scraper::{Html, Selector};
use url::Url;

/// Links extracted from an HTML page, resolved to absolute URLs
#[derive(Debug, Clone, Default)]
pub struct ParsedLinks {
    /// Every hyperlink-bearing tag's target, in document order
    pub links: Vec<String>,

    /// `<a>` targets whose raw href looks like a listing page
    pub listing_links: Vec<String>,
}

/// Parses HTML content and extracts links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document
/// - `<link href="...">` of any `rel` (canonical, alternate, stylesheet)
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
///
/// Fragments are stripped from the resolved URLs.
///
/// # Example
///
/// ```
/// use indexscope::crawler::parse_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_links(html, &base_url);
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_links(html: &str, base_url: &Url) -> ParsedLinks {
    let document = Html::parse_document(html);

    let mut parsed = ParsedLinks::default();

    if let Ok(selector) = Selector::parse("a[href], link[href]") {
        for element in document.select(&selector) {
            if let Some(absolute_url) = element.value().attr("href").and_then(|h| resolve_link(h, base_url)) {
                parsed.links.push(absolute_url);
            }
        }
    }

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if !is_listing_link(href) {
                continue;
            }
            if let Some(absolute_url) = resolve_link(href, base_url) {
                parsed.listing_links.push(absolute_url);
            }
        }
    }

    parsed
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }
    absolute_url.set_fragment(None);

    Some(absolute_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let parsed = parse_links(html, &base_url());
        assert_eq!(parsed.links, vec!["https://other.com/page".to_string()]);
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let parsed = parse_links(html, &base_url());
        assert_eq!(parsed.links, vec!["https://example.com/other".to_string()]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let html = r#"<html><body><a href="other">Link</a></body></html>"#;
        let parsed = parse_links(html, &base_url());
        assert_eq!(parsed.links, vec!["https://example.com/other".to_string()]);
    }

    #[test]
    fn test_link_elements_included() {
        let html = r#"<html><head>
            <link rel="canonical" href="https://example.com/canonical" />
            <link rel="stylesheet" href="/style.css" />
        </head><body></body></html>"#;
        let parsed = parse_links(html, &base_url());
        assert!(parsed.links.contains(&"https://example.com/canonical".to_string()));
        assert!(parsed.links.contains(&"https://example.com/style.css".to_string()));
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"<html><body>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="tel:+1234567890">Call</a>
            <a href="data:text/html,<h1>Test</h1>">Data</a>
            <a href="ftp://example.com/file">FTP</a>
        </body></html>"#;
        let parsed = parse_links(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        let parsed = parse_links(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_fragment_stripped() {
        let html = r##"<html><body><a href="/about#team">About</a></body></html>"##;
        let parsed = parse_links(html, &base_url());
        assert_eq!(parsed.links, vec!["https://example.com/about".to_string()]);
    }

    #[test]
    fn test_listing_links() {
        let html = r#"<html><body>
            <a href="/property/seaside-cottage">Cottage</a>
            <a href="/Rooms/2">Room 2</a>
            <a href="/about">About</a>
        </body></html>"#;
        let parsed = parse_links(html, &base_url());
        assert_eq!(parsed.links.len(), 3);
        assert_eq!(
            parsed.listing_links,
            vec![
                "https://example.com/property/seaside-cottage".to_string(),
                "https://example.com/Rooms/2".to_string(),
            ]
        );
    }

    #[test]
    fn test_listing_pattern_ignores_link_elements() {
        let html = r#"<html><head><link rel="alternate" href="/property-feed.xml"></head></html>"#;
        let parsed = parse_links(html, &base_url());
        assert_eq!(parsed.links.len(), 1);
        assert!(parsed.listing_links.is_empty());
    }

    #[test]
    fn test_resolve_link_trims_whitespace() {
        assert_eq!(
            resolve_link("  /contact  ", &base_url()),
            Some("https://example.com/contact".to_string())
        );
        assert_eq!(resolve_link("   ", &base_url()), None);
    }
}
