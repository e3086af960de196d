//! The ordered on-page checklist
//!
//! Each check looks at the extracted signals independently and may report an
//! issue string, a category, or both. Checks run in table order and their
//! findings are appended in that order, which is what makes the first
//! category the primary one.

use super::signals::PageSignals;
use super::IssueCategory;

/// Pages with fewer words are treated as possible soft 404s
pub const SOFT_404_WORDS: usize = 100;

/// Pages with fewer words (and at least [`SOFT_404_WORDS`]) are thin
pub const THIN_CONTENT_WORDS: usize = 300;

/// Pages missing a description below this word count are unlikely to be indexed
pub const DESCRIPTION_WORDS: usize = 500;

/// Titles shorter than this are flagged
pub const MIN_TITLE_CHARS: usize = 20;

/// What a single check reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Finding {
    pub issue: Option<&'static str>,
    pub category: Option<IssueCategory>,
}

impl Finding {
    fn issue(issue: &'static str) -> Self {
        Self {
            issue: Some(issue),
            category: None,
        }
    }

    fn both(issue: &'static str, category: IssueCategory) -> Self {
        Self {
            issue: Some(issue),
            category: Some(category),
        }
    }

    fn category(category: IssueCategory) -> Self {
        Self {
            issue: None,
            category: Some(category),
        }
    }
}

type Check = fn(&PageSignals, &str) -> Option<Finding>;

/// The checklist, in precedence order
pub const CHECKLIST: &[(&str, Check)] = &[
    ("canonical presence", canonical_presence),
    ("canonical mismatch", canonical_mismatch),
    ("robots noindex", robots_noindex),
    ("content length", content_length),
    ("missing title", missing_title),
    ("short title", short_title),
    ("meta description", meta_description),
];

/// Runs every check and collects the findings in order
pub fn run_checklist(signals: &PageSignals, url: &str) -> Vec<Finding> {
    CHECKLIST
        .iter()
        .filter_map(|(name, check)| {
            let finding = check(signals, url)?;
            tracing::trace!("{}: {} fired", url, name);
            Some(finding)
        })
        .collect()
}

fn canonical_presence(signals: &PageSignals, _url: &str) -> Option<Finding> {
    signals.canonical.is_none().then(|| {
        Finding::both(
            "Missing canonical tag",
            IssueCategory::DuplicateWithoutCanonical,
        )
    })
}

fn canonical_mismatch(signals: &PageSignals, url: &str) -> Option<Finding> {
    let href = signals.canonical.as_deref()?;
    (!href.is_empty() && href != url)
        .then(|| Finding::category(IssueCategory::AlternateWithCanonical))
}

fn robots_noindex(signals: &PageSignals, _url: &str) -> Option<Finding> {
    signals
        .noindex
        .then(|| Finding::both("Has noindex tag", IssueCategory::ExcludedByNoindex))
}

fn content_length(signals: &PageSignals, _url: &str) -> Option<Finding> {
    if signals.word_count < SOFT_404_WORDS {
        Some(Finding::both(
            "Possible soft 404 (thin content)",
            IssueCategory::Soft404,
        ))
    } else if signals.word_count < THIN_CONTENT_WORDS {
        Some(Finding::both(
            "Thin content (may not be indexed)",
            IssueCategory::CrawledNotIndexed,
        ))
    } else {
        None
    }
}

fn missing_title(signals: &PageSignals, _url: &str) -> Option<Finding> {
    signals
        .title
        .is_none()
        .then(|| Finding::issue("Missing title tag"))
}

fn short_title(signals: &PageSignals, _url: &str) -> Option<Finding> {
    let title = signals.title.as_deref()?;
    (title.chars().count() < MIN_TITLE_CHARS).then(|| Finding::issue("Title too short"))
}

fn meta_description(signals: &PageSignals, _url: &str) -> Option<Finding> {
    if signals.meta_description.is_some() {
        return None;
    }
    if signals.word_count < DESCRIPTION_WORDS {
        Some(Finding::both(
            "Missing meta description",
            IssueCategory::DiscoveredNotIndexed,
        ))
    } else {
        Some(Finding::issue("Missing meta description"))
    }
}
