//! Console summary of an audit
//!
//! Prints the issue breakdown the way the markdown summary reports it, for
//! a quick look without opening any files.

use crate::output::report::AuditReport;

/// Formats the console summary
///
/// One line per non-zero category in reporting order, followed by the
/// number of pages with issues and the number of pages audited.
pub fn format_statistics(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str("=== Audit Summary ===\n\n");

    if report.tally().total() > 0 {
        out.push_str("Issues by Category:\n");
        for (category, count) in report.tally().non_zero() {
            let percentage = if report.is_empty() {
                0.0
            } else {
                (count as f64 / report.len() as f64) * 100.0
            };
            out.push_str(&format!("  {}: {} ({:.1}%)\n", category, count, percentage));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Total pages with issues: {}\n",
        report.pages_with_issues()
    ));
    out.push_str(&format!("Total pages audited: {}\n", report.len()));

    out
}

/// Prints the console summary to stdout
///
/// # Arguments
///
/// * `report` - The finished audit report
pub fn print_statistics(report: &AuditReport) {
    print!("{}", format_statistics(report));
}
