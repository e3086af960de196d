//! Canonical tag fix planning
//!
//! Lists every audited page whose canonical link does not point at the page
//! itself, so the site template can be corrected to self-referencing
//! canonicals. Static assets are left out.

use crate::output::{write_csv, OutputResult, ReportRow};
use crate::url::Origin;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Column headers of the canonical fix export
pub const CANONICAL_FIX_HEADERS: [&str; 4] = ["URL", "Current Canonical", "Correct Canonical", "Action"];

/// Action written on every fix
pub const UPDATE_CANONICAL: &str = "UPDATE CANONICAL TAG";

/// URL fragments marking static assets
const ASSET_MARKERS: &[&str] = &[".js", ".css", ".png", ".svg", ".ico", ".webmanifest"];

/// A page whose canonical tag must change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalFix {
    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "Current Canonical")]
    pub current: String,

    #[serde(rename = "Correct Canonical")]
    pub correct: String,

    #[serde(rename = "Action")]
    pub action: String,
}

/// Fixes plus the figures reported alongside them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalPlan {
    pub fixes: Vec<CanonicalFix>,

    /// Rows checked, including assets
    pub total_rows: usize,

    /// Rows skipped as static assets
    pub asset_rows: usize,

    /// Rows whose canonical is the site homepage
    pub homepage_canonicals: usize,
}

/// Returns true if the URL looks like a static asset
pub fn is_asset_url(url: &str) -> bool {
    ASSET_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Plans canonical fixes for exported report rows
///
/// The correct canonical of a page is the page URL itself. A row whose
/// canonical is "Missing" needs a fix too.
pub fn plan_canonical_fixes(rows: &[ReportRow], origin: &Origin) -> CanonicalPlan {
    let homepage = origin.homepage();
    let mut plan = CanonicalPlan {
        total_rows: rows.len(),
        ..CanonicalPlan::default()
    };

    for row in rows {
        if row.canonical == homepage {
            plan.homepage_canonicals += 1;
        }

        if is_asset_url(&row.url) {
            plan.asset_rows += 1;
            continue;
        }

        if row.canonical != row.url {
            plan.fixes.push(CanonicalFix {
                url: row.url.clone(),
                current: row.canonical.clone(),
                correct: row.url.clone(),
                action: UPDATE_CANONICAL.to_string(),
            });
        }
    }

    plan
}

/// Writes the canonical fix CSV
pub fn write_canonical_fixes(path: &Path, fixes: &[CanonicalFix]) -> OutputResult<()> {
    write_csv(File::create(path)?, &CANONICAL_FIX_HEADERS, fixes)
}
