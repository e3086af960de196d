//! Redirect recommendations for 404 pages
//!
//! Every 404 row of an audit report gets a 301 target picked from its path,
//! then the rules are written as a CSV map and as Apache `Redirect` lines.

use crate::output::{write_csv, OutputResult, ReportRow};
use crate::url::Origin;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use url::Url;

/// Column headers of the redirect map export
pub const REDIRECT_MAP_HEADERS: [&str; 4] = ["Old URL", "Redirect To", "Type", "Rule"];

/// Comment lines opening the rewrite-rule file
pub const RULES_PREAMBLE: &str = "# 404 Redirect Rules\n# Add these to your .htaccess file\n\n";

/// Path substrings and the site section they redirect to, checked in order
const SECTION_RULES: &[(&[&str], &str)] = &[
    (&["property", "listing"], "/properties/"),
    (&["contact"], "/contact/"),
    (&["about"], "/about/"),
    (&["blog", "news"], "/blog/"),
];

/// A recommended permanent redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    /// The URL that answered 404
    pub old_url: String,

    /// Path of the old URL
    pub path: String,

    /// Where the old URL should point
    pub target_url: String,

    /// `Redirect 301 <path> <target>`
    pub rule_text: String,
}

#[derive(Serialize)]
struct RedirectMapRow<'a> {
    #[serde(rename = "Old URL")]
    old_url: &'a str,
    #[serde(rename = "Redirect To")]
    redirect_to: &'a str,
    #[serde(rename = "Type")]
    kind: &'a str,
    #[serde(rename = "Rule")]
    rule: &'a str,
}

/// Picks the redirect target for a 404 path
///
/// Matching is a case-sensitive substring test against the path only.
pub fn redirect_target(path: &str, origin: &Origin) -> String {
    SECTION_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| path.contains(needle)))
        .map(|(_, section)| origin.join_path(section))
        .unwrap_or_else(|| origin.homepage())
}

/// Recommends a redirect for every 404 row
///
/// Rows whose URL does not parse are skipped with a warning.
pub fn recommend_redirects(rows: &[ReportRow], origin: &Origin) -> Vec<RedirectRule> {
    rows.iter()
        .filter(|row| row.is_not_found())
        .filter_map(|row| {
            let path = match Url::parse(&row.url) {
                Ok(url) => url.path().to_string(),
                Err(e) => {
                    tracing::warn!("Skipping unparseable URL {}: {}", row.url, e);
                    return None;
                }
            };

            let target_url = redirect_target(&path, origin);
            let rule_text = format!("Redirect 301 {} {}", path, target_url);

            Some(RedirectRule {
                old_url: row.url.clone(),
                path,
                target_url,
                rule_text,
            })
        })
        .collect()
}

/// Formats the rewrite-rule file contents
pub fn format_rules(rules: &[RedirectRule]) -> String {
    let mut out = String::from(RULES_PREAMBLE);
    for rule in rules {
        out.push_str(&rule.rule_text);
        out.push('\n');
    }
    out
}

/// Writes the rewrite-rule file
pub fn write_rules(path: &Path, rules: &[RedirectRule]) -> OutputResult<()> {
    let mut file = File::create(path)?;
    file.write_all(format_rules(rules).as_bytes())?;
    Ok(())
}

/// Writes the redirect map CSV
pub fn write_redirect_map(path: &Path, rules: &[RedirectRule]) -> OutputResult<()> {
    let rows: Vec<_> = rules
        .iter()
        .map(|rule| RedirectMapRow {
            old_url: &rule.old_url,
            redirect_to: &rule.target_url,
            kind: "301",
            rule: &rule.rule_text,
        })
        .collect();
    write_csv(File::create(path)?, &REDIRECT_MAP_HEADERS, &rows)
}
