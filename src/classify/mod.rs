//! Page classification
//!
//! [`classify`] turns one fetch outcome into a [`PageRecord`]. It is a pure
//! function: the same URL and response always produce the same record.
//!
//! # Status handling
//!
//! | Outcome | Issues | Categories |
//! |---------|--------|------------|
//! | 404 | "404 Not Found" | Not found (404) |
//! | 301, 302, 307, 308 | "<status> Redirect" | Page with redirect |
//! | 200 | ordered checklist, see [`checks`] | ordered checklist |
//! | other status | none | none |
//! | fetch error | "Could not fetch: <message>" | none |

pub mod checks;
mod signals;

pub use signals::{count_visible_words, extract_signals, PageSignals};

use crate::crawler::{FetchError, FetchResult};
use std::fmt;

/// Longest meta description kept on a record, in characters
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

/// Primary issue of a record with no categories
pub const NO_ISSUES: &str = "No issues";

/// Search-console indexing categories
///
/// The variant order is the order used when tallying and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueCategory {
    DuplicateWithoutCanonical,
    CrawledNotIndexed,
    Soft404,
    DiscoveredNotIndexed,
    NotFound,
    PageWithRedirect,
    ExcludedByNoindex,
    AlternateWithCanonical,
}

impl IssueCategory {
    /// Every category in reporting order
    pub const ALL: [IssueCategory; 8] = [
        Self::DuplicateWithoutCanonical,
        Self::CrawledNotIndexed,
        Self::Soft404,
        Self::DiscoveredNotIndexed,
        Self::NotFound,
        Self::PageWithRedirect,
        Self::ExcludedByNoindex,
        Self::AlternateWithCanonical,
    ];

    /// The label shown in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::DuplicateWithoutCanonical => "Duplicate without user-selected canonical",
            Self::CrawledNotIndexed => "Crawled - currently not indexed",
            Self::Soft404 => "Soft 404",
            Self::DiscoveredNotIndexed => "Discovered - currently not indexed",
            Self::NotFound => "Not found (404)",
            Self::PageWithRedirect => "Page with redirect",
            Self::ExcludedByNoindex => "Excluded by 'noindex' tag",
            Self::AlternateWithCanonical => "Alternate page with proper canonical tag",
        }
    }

    /// Looks a category up by its report label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// HTTP status of an audited page, or the absence of one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Code(u16),
    Error,
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Error => f.write_str("Error"),
        }
    }
}

/// The classification of one audited URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    pub status: PageStatus,

    /// Human-readable issues, in checklist order
    pub issues: Vec<String>,

    /// Categories, in checklist order
    pub categories: Vec<IssueCategory>,

    /// Label of the first category, or [`NO_ISSUES`]
    pub primary_issue: String,

    pub word_count: Option<usize>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical: Option<String>,
    pub redirect_to: Option<String>,
}

impl PageRecord {
    fn new(url: &str, status: PageStatus) -> Self {
        Self {
            url: url.to_string(),
            status,
            issues: Vec::new(),
            categories: Vec::new(),
            primary_issue: NO_ISSUES.to_string(),
            word_count: None,
            title: None,
            meta_description: None,
            canonical: None,
            redirect_to: None,
        }
    }

    fn push(&mut self, issue: Option<&str>, category: Option<IssueCategory>) {
        if let Some(issue) = issue {
            self.issues.push(issue.to_string());
        }
        if let Some(category) = category {
            self.categories.push(category);
        }
    }

    /// The first category, if any
    pub fn primary_category(&self) -> Option<IssueCategory> {
        self.categories.first().copied()
    }

    /// Returns true if any issue was recorded
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty() || !self.categories.is_empty()
    }

    fn finish(mut self) -> Self {
        if let Some(category) = self.primary_category() {
            self.primary_issue = category.label().to_string();
        }
        self
    }
}

/// Classifies one fetch outcome
///
/// The response must come from a fetch that did not follow redirects, so
/// that 3xx statuses are seen as they are.
///
/// # Arguments
///
/// * `url` - The audited URL, compared against the canonical href as-is
/// * `outcome` - The response, or the error that replaced it
pub fn classify(url: &str, outcome: &Result<FetchResult, FetchError>) -> PageRecord {
    let response = match outcome {
        Ok(response) => response,
        Err(error) => {
            let mut record = PageRecord::new(url, PageStatus::Error);
            record.issues.push(format!("Could not fetch: {}", error.message));
            return record.finish();
        }
    };

    let status = PageStatus::Code(response.status);
    let mut record = PageRecord::new(url, status);

    match response.status {
        404 => record.push(Some("404 Not Found"), Some(IssueCategory::NotFound)),
        301 | 302 | 307 | 308 => {
            let issue = format!("{} Redirect", response.status);
            record.push(Some(issue.as_str()), Some(IssueCategory::PageWithRedirect));
            record.redirect_to = Some(response.header("location").unwrap_or_default().to_string());
        }
        200 => {
            let signals = extract_signals(&response.text());
            for finding in checks::run_checklist(&signals, url) {
                record.push(finding.issue, finding.category);
            }

            record.word_count = Some(signals.word_count);
            record.title = signals.title;
            record.canonical = signals.canonical;
            record.meta_description = signals
                .meta_description
                .map(|description| description.chars().take(META_DESCRIPTION_MAX_CHARS).collect());
        }
        _ => {}
    }

    record.finish()
}
