//! Output sink traits and types
//!
//! This module defines the trait interface for report sinks and the data
//! structure handed to the summary generators once an audit finishes.

use crate::discovery::PassContribution;
use crate::output::report::AuditReport;
use crate::output::report::ReportRow;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for report sinks
///
/// A sink receives report rows in audit order and writes them somewhere.
/// Rows are written as they arrive; `finish` flushes whatever is buffered.
pub trait ReportSink {
    /// Writes one report row
    ///
    /// # Arguments
    ///
    /// * `row` - The row to write
    fn write_row(&mut self, row: &ReportRow) -> OutputResult<()>;

    /// Flushes buffered rows
    fn finish(&mut self) -> OutputResult<()>;

    /// Writes every row in order, then flushes
    fn write_all(&mut self, rows: &[ReportRow]) -> OutputResult<()> {
        for row in rows {
            self.write_row(row)?;
        }
        self.finish()
    }
}

/// Everything the run summaries report about one audit
#[derive(Debug, Clone)]
pub struct AuditSummary {
    /// The audited origin
    pub origin: String,

    /// RFC 3339 start timestamp
    pub started_at: String,

    /// RFC 3339 finish timestamp
    pub finished_at: Option<String>,

    pub duration_seconds: Option<u64>,

    /// Hash of the configuration file, when one was loaded
    pub config_hash: Option<String>,

    /// New URLs contributed by each discovery pass
    pub contributions: Vec<PassContribution>,

    /// Sitemap that supplied URLs, if any
    pub sitemap_url: Option<String>,

    /// Pages fetched by the link crawl
    pub crawled_pages: usize,

    /// Classified pages and their tally
    pub report: AuditReport,
}

impl AuditSummary {
    /// Total URLs discovered across every pass
    pub fn discovered(&self) -> usize {
        self.contributions.iter().map(|c| c.added).sum()
    }
}
