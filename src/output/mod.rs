//! Output module for audit reports and summaries
//!
//! This module handles:
//! - Aggregating page records into rows and an issue tally
//! - Writing the page report and issue summary as CSV
//! - Generating the markdown summary of a run
//! - Printing the console summary

mod csv_output;
mod markdown;
mod report;
pub mod stats;
mod traits;

pub use csv_output::{read_csv, read_report_rows, write_csv, write_summary, CsvReportSink};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use report::{
    AuditReport, IssueTally, ReportRow, SummaryRow, MISSING, REPORT_HEADERS, SUMMARY_HEADERS,
};
pub use stats::{format_statistics, print_statistics};
pub use traits::{AuditSummary, OutputError, OutputResult, ReportSink};
