//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of an audit run,
//! including discovery statistics, the issue breakdown and the 404 list.

use crate::output::traits::{AuditSummary, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Longest 404 list written before truncating
const MAX_LISTED_NOT_FOUND: usize = 50;

/// Generates a markdown summary of an audit
///
/// # Arguments
///
/// * `summary` - The audit summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &AuditSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats an audit summary as markdown
pub fn format_markdown_summary(summary: &AuditSummary) -> String {
    let report = &summary.report;
    let mut md = String::new();

    md.push_str("# Indexscope Audit Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Origin**: {}\n", summary.origin));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished));
    }
    if let Some(duration) = summary.duration_seconds {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Discovery
    md.push_str("## Discovery\n\n");
    md.push_str("| Pass | New URLs |\n");
    md.push_str("|------|----------|\n");
    for contribution in &summary.contributions {
        md.push_str(&format!("| {} | {} |\n", contribution.pass, contribution.added));
    }
    md.push('\n');
    md.push_str(&format!("- **Total URLs**: {}\n", summary.discovered()));
    match &summary.sitemap_url {
        Some(sitemap) => md.push_str(&format!("- **Sitemap**: {}\n", sitemap)),
        None => md.push_str("- **Sitemap**: none found\n"),
    }
    md.push_str(&format!("- **Pages Crawled**: {}\n\n", summary.crawled_pages));

    // Issue breakdown
    md.push_str("## Issue Breakdown\n\n");
    md.push_str("| Issue Type | Count |\n");
    md.push_str("|------------|-------|\n");
    for (category, count) in report.tally().non_zero() {
        md.push_str(&format!("| {} | {} |\n", category, count));
    }
    md.push('\n');
    md.push_str(&format!("- **Pages Audited**: {}\n", report.len()));
    md.push_str(&format!(
        "- **Pages With Issues**: {}\n\n",
        report.pages_with_issues()
    ));

    // 404 list
    let not_found = report.not_found_urls();
    if !not_found.is_empty() {
        md.push_str("## Not Found (404)\n\n");
        for url in not_found.iter().take(MAX_LISTED_NOT_FOUND) {
            md.push_str(&format!("- {}\n", url));
        }
        if not_found.len() > MAX_LISTED_NOT_FOUND {
            md.push_str(&format!(
                "\n... and {} more\n",
                not_found.len() - MAX_LISTED_NOT_FOUND
            ));
        }
        md.push('\n');
    }

    md
}
