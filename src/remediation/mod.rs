//! Offline remediation passes over an exported audit report
//!
//! Both passes read the CSV report written by an audit run and never touch
//! the network:
//!
//! - `redirects`: 301 targets for pages that answered 404
//! - `canonical`: pages whose canonical tag is not self-referencing

pub mod canonical;
pub mod redirects;

pub use canonical::{plan_canonical_fixes, write_canonical_fixes, CanonicalFix, CanonicalPlan};
pub use redirects::{recommend_redirects, write_redirect_map, write_rules, RedirectRule};

use crate::output::{read_report_rows, ReportRow};
use crate::{AuditError, Result};
use std::path::Path;

/// Reads an audit report, reporting a missing file as [`AuditError::MissingInput`]
pub fn load_report(path: &Path) -> Result<Vec<ReportRow>> {
    if !path.exists() {
        return Err(AuditError::MissingInput {
            path: path.display().to_string(),
        });
    }
    Ok(read_report_rows(path)?)
}
