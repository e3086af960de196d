//! Crawler module for page fetching and audit orchestration
//!
//! This module contains the core audit logic, including:
//! - HTTP fetching with bounded retry and a per-call redirect choice
//! - HTML link extraction for the discovery crawl
//! - Request pacing
//! - Overall audit coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_audit, write_outputs, Coordinator};
pub use fetcher::{
    build_http_client, user_agent_string, FetchError, FetchErrorKind, FetchResult, Fetcher, Method,
};
pub use parser::{parse_links, resolve_link, ParsedLinks};
pub use scheduler::Politeness;

use crate::config::Config;
use crate::output::AuditSummary;
use crate::Result;

/// Runs a complete audit operation
///
/// This is the main entry point for auditing a site. It will:
/// 1. Discover pages via sitemap, link crawl and path probing
/// 2. Fetch each discovered page without following redirects
/// 3. Classify every page into issues and categories
/// 4. Write the CSV report, issue summary and markdown summary
///
/// # Arguments
///
/// * `config` - The audit configuration
///
/// # Returns
///
/// * `Ok(AuditSummary)` - Audit completed and outputs were written
/// * `Err(AuditError)` - The audit could not start or an output failed
pub async fn audit(config: Config) -> Result<AuditSummary> {
    run_audit(config, None).await
}
