/// Path keywords that mark property/listing detail pages
const LISTING_KEYWORDS: &[&str] = &["property", "listing", "accommodation", "room"];

/// Checks whether a candidate URL belongs to an origin prefix
///
/// The candidate must start with the origin string, and the character right
/// after the prefix must be the end of the string or one of `/`, `?`, `#`.
/// A plain prefix test would let `https://example.com.evil.net` through.
///
/// # Examples
///
/// ```
/// use indexscope::url::is_same_origin;
///
/// assert!(is_same_origin("https://example.com", "https://example.com/about"));
/// assert!(is_same_origin("https://example.com", "https://example.com"));
/// assert!(!is_same_origin("https://example.com", "https://example.com.evil.net/"));
/// assert!(!is_same_origin("https://example.com", "https://other.com/"));
/// ```
pub fn is_same_origin(origin: &str, candidate: &str) -> bool {
    match candidate.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}

/// Returns true if an href looks like a property/listing/accommodation/room page
///
/// Listing detail pages tend to sit deeper than the crawl depth allows, so
/// hrefs matching this pattern are collected regardless of depth.
pub fn is_listing_link(href: &str) -> bool {
    let lower = href.to_lowercase();
    LISTING_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
