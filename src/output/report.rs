//! Report aggregation
//!
//! [`AuditReport`] keeps page records in arrival order and tallies each
//! record's primary category. It also converts records into the flat rows
//! written to the CSV report and the per-category summary.

use crate::classify::{IssueCategory, PageRecord, PageStatus};
use serde::{Deserialize, Serialize};

/// Placeholder for an absent title, description or canonical
pub const MISSING: &str = "Missing";

/// Column headers of the page report, in field order
pub const REPORT_HEADERS: [&str; 9] = [
    "URL",
    "Status Code",
    "Primary Issue",
    "All Issues",
    "Word Count",
    "Title",
    "Meta Description",
    "Canonical",
    "Redirect To",
];

/// Column headers of the summary export
pub const SUMMARY_HEADERS: [&str; 2] = ["Issue Type", "Count"];

/// One line of the page report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "URL")]
    pub url: String,

    /// Numeric status, or "Error"
    #[serde(rename = "Status Code")]
    pub status_code: String,

    #[serde(rename = "Primary Issue")]
    pub primary_issue: String,

    /// Issues joined by ", "
    #[serde(rename = "All Issues", default)]
    pub all_issues: String,

    #[serde(rename = "Word Count", default)]
    pub word_count: usize,

    #[serde(rename = "Title", default)]
    pub title: String,

    #[serde(rename = "Meta Description", default)]
    pub meta_description: String,

    #[serde(rename = "Canonical", default)]
    pub canonical: String,

    #[serde(rename = "Redirect To", default)]
    pub redirect_to: String,
}

impl ReportRow {
    /// Returns true if the row records a 404 response
    pub fn is_not_found(&self) -> bool {
        self.status_code.trim() == "404"
    }
}

impl From<&PageRecord> for ReportRow {
    fn from(record: &PageRecord) -> Self {
        let or_missing = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING.to_string());

        Self {
            url: record.url.clone(),
            status_code: record.status.to_string(),
            primary_issue: record.primary_issue.clone(),
            all_issues: record.issues.join(", "),
            word_count: record.word_count.unwrap_or(0),
            title: or_missing(&record.title),
            meta_description: or_missing(&record.meta_description),
            canonical: or_missing(&record.canonical),
            redirect_to: record.redirect_to.clone().unwrap_or_default(),
        }
    }
}

/// One line of the summary export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Issue Type")]
    pub issue_type: String,

    #[serde(rename = "Count")]
    pub count: usize,
}

/// Count of records per primary category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueTally {
    counts: [usize; 8],
}

impl IssueTally {
    /// Creates a tally with every count at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a record under its primary category
    ///
    /// Records without a category are not counted.
    pub fn record(&mut self, record: &PageRecord) {
        if let Some(category) = record.primary_category() {
            self.increment(category);
        }
    }

    /// Adds one to a category
    pub fn increment(&mut self, category: IssueCategory) {
        self.counts[Self::index(category)] += 1;
    }

    /// Current count of a category
    pub fn get(&self, category: IssueCategory) -> usize {
        self.counts[Self::index(category)]
    }

    /// Sum over every category
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Every category with its count, in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (IssueCategory, usize)> + '_ {
        IssueCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Categories with a non-zero count, in reporting order
    pub fn non_zero(&self) -> impl Iterator<Item = (IssueCategory, usize)> + '_ {
        self.iter().filter(|(_, count)| *count > 0)
    }

    fn index(category: IssueCategory) -> usize {
        category as usize
    }
}

/// Records of one audit, in arrival order, with their tally
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    records: Vec<PageRecord>,
    tally: IssueTally,
}

impl AuditReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and updates the tally
    pub fn add(&mut self, record: PageRecord) {
        self.tally.record(&record);
        self.records.push(record);
    }

    /// Records in arrival order
    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn tally(&self) -> &IssueTally {
        &self.tally
    }

    /// Number of audited pages
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pages whose primary issue is not "No issues"
    pub fn pages_with_issues(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.primary_category().is_some())
            .count()
    }

    /// URLs that answered 404, in arrival order
    pub fn not_found_urls(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|record| record.status == PageStatus::Code(404))
            .map(|record| record.url.as_str())
            .collect()
    }

    /// Report rows in arrival order
    pub fn rows(&self) -> Vec<ReportRow> {
        self.records.iter().map(ReportRow::from).collect()
    }

    /// Summary rows for every non-zero category, in reporting order
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.tally
            .non_zero()
            .map(|(category, count)| SummaryRow {
                issue_type: category.label().to_string(),
                count,
            })
            .collect()
    }
}

impl FromIterator<PageRecord> for AuditReport {
    fn from_iter<I: IntoIterator<Item = PageRecord>>(iter: I) -> Self {
        let mut report = Self::new();
        for record in iter {
            report.add(record);
        }
        report
    }
}
