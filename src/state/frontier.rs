use crate::url::Origin;
use std::collections::HashSet;

/// Outcome of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The URL was new and has been added
    Added,
    /// The URL was already discovered
    Duplicate,
    /// The URL is not on the audited origin
    OffOrigin,
    /// The frontier is at its cap
    Full,
}

impl Admission {
    /// Returns true if the URL was newly added
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

/// The set of discovered URLs for one audit run
///
/// URLs keep their discovery order so that page records come out in a
/// stable order. Invariants:
///
/// - every URL starts with the origin (see [`Origin::contains`])
/// - the number of discovered URLs never exceeds `cap`
/// - every visited URL is also discovered
#[derive(Debug, Clone)]
pub struct Frontier {
    origin: Origin,
    cap: usize,
    order: Vec<String>,
    discovered: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier for an origin with a size cap
    pub fn new(origin: Origin, cap: usize) -> Self {
        Self {
            origin,
            cap,
            order: Vec::new(),
            discovered: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Offers a URL to the frontier
    pub fn insert(&mut self, url: &str) -> Admission {
        if !self.origin.contains(url) {
            return Admission::OffOrigin;
        }
        if self.discovered.contains(url) {
            return Admission::Duplicate;
        }
        if self.is_full() {
            return Admission::Full;
        }

        self.discovered.insert(url.to_string());
        self.order.push(url.to_string());
        Admission::Added
    }

    /// Records that a URL has been fetched during the crawl
    ///
    /// The URL is inserted first; it only counts as visited if it is (or
    /// becomes) part of the frontier.
    pub fn mark_visited(&mut self, url: &str) -> Admission {
        let admission = self.insert(url);
        if self.discovered.contains(url) {
            self.visited.insert(url.to_string());
        }
        admission
    }

    /// Returns true if the URL has been discovered
    pub fn contains(&self, url: &str) -> bool {
        self.discovered.contains(url)
    }

    /// Returns true if the URL has already been fetched by the crawl
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns true once the cap has been reached
    pub fn is_full(&self) -> bool {
        self.order.len() >= self.cap
    }

    /// Number of discovered URLs
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether no URL has been discovered yet
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of URLs fetched by the crawl
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// The configured size cap
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// The audited origin
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Discovered URLs in discovery order
    pub fn urls(&self) -> &[String] {
        &self.order
    }

    /// Ends discovery, yielding the URLs to audit in discovery order
    pub fn freeze(self) -> Vec<String> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontier(cap: usize) -> Frontier {
        Frontier::new(Origin::parse("example.com").unwrap(), cap)
    }

    #[test]
    fn test_new_frontier_is_empty() {
        let frontier = frontier(10);
        assert!(frontier.is_empty());
        assert_eq!(frontier.len(), 0);
        assert_eq!(frontier.cap(), 10);
    }

    #[test]
    fn test_insert_and_dedup() {
        let mut frontier = frontier(10);
        assert_eq!(frontier.insert("https://example.com/a"), Admission::Added);
        assert_eq!(frontier.insert("https://example.com/a"), Admission::Duplicate);
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_off_origin_rejected() {
        let mut frontier = frontier(10);
        assert_eq!(frontier.insert("https://other.com/a"), Admission::OffOrigin);
        assert_eq!(
            frontier.insert("https://example.com.evil.net/"),
            Admission::OffOrigin
        );
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_cap_enforced() {
        let mut frontier = frontier(2);
        assert!(frontier.insert("https://example.com/1").is_added());
        assert!(frontier.insert("https://example.com/2").is_added());
        assert_eq!(frontier.insert("https://example.com/3"), Admission::Full);
        assert_eq!(frontier.len(), 2);
        assert!(frontier.is_full());
    }

    #[test]
    fn test_duplicate_reported_even_when_full() {
        let mut frontier = frontier(1);
        frontier.insert("https://example.com/1");
        assert_eq!(frontier.insert("https://example.com/1"), Admission::Duplicate);
    }

    #[test]
    fn test_visited_is_subset_of_discovered() {
        let mut frontier = frontier(1);
        frontier.mark_visited("https://example.com/1");
        frontier.mark_visited("https://example.com/2");

        assert!(frontier.is_visited("https://example.com/1"));
        assert!(!frontier.is_visited("https://example.com/2"));
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_freeze_keeps_discovery_order() {
        let mut frontier = frontier(10);
        frontier.insert("https://example.com/b");
        frontier.insert("https://example.com/a");
        frontier.insert("https://example.com/c");

        assert_eq!(
            frontier.freeze(),
            vec![
                "https://example.com/b".to_string(),
                "https://example.com/a".to_string(),
                "https://example.com/c".to_string(),
            ]
        );
    }
}
