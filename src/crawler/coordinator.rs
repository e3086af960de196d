//! Audit coordinator - main audit orchestration logic
//!
//! This module runs one audit from start to finish:
//! - Discovering the site's pages into a frozen frontier
//! - Fetching each page without following redirects
//! - Classifying every response and aggregating the records
//! - Writing the CSV report, the issue summary and the markdown summary

use crate::classify::classify;
use crate::config::{Config, OutputConfig};
use crate::crawler::{Fetcher, Method, Politeness};
use crate::discovery::{DiscoveryEngine, DiscoveryOutcome};
use crate::output::{
    generate_markdown_summary, write_summary, AuditReport, AuditSummary, CsvReportSink, ReportSink,
};
use crate::url::Origin;
use crate::Result;
use std::path::Path;
use std::time::{Duration, Instant};

/// How often audit progress is logged, in pages
const PROGRESS_INTERVAL: usize = 10;

/// Main audit coordinator structure
pub struct Coordinator {
    config: Config,
    origin: Origin,
    fetcher: Fetcher,
    politeness: Politeness,
    config_hash: Option<String>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The audit configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(AuditError)` - The domain is not a valid origin or the HTTP
    ///   client could not be built
    pub fn new(config: Config) -> Result<Self> {
        let origin = Origin::parse(&config.site.domain)?;
        let fetcher = Fetcher::new(&config.user_agent, &config.crawler)?;
        let politeness = Politeness::from_config(&config.crawler);

        Ok(Self {
            config,
            origin,
            fetcher,
            politeness,
            config_hash: None,
        })
    }

    /// Records the hash of the configuration file for the summary
    pub fn with_config_hash(mut self, config_hash: Option<String>) -> Self {
        self.config_hash = config_hash;
        self
    }

    /// Turns the politeness pause off
    pub fn without_delay(mut self) -> Self {
        self.politeness = Politeness::disabled();
        self
    }

    /// The audited origin
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Number of paced requests so far
    pub fn requests_made(&self) -> u64 {
        self.politeness.request_count()
    }

    /// Runs every discovery pass
    pub async fn discover(&mut self) -> DiscoveryOutcome {
        tracing::info!("Discovering pages on {}", self.origin);
        let mut engine = DiscoveryEngine::new(&self.fetcher, &self.config.crawler, &mut self.politeness);
        let outcome = engine.discover(&self.origin).await;
        tracing::info!("Discovered {} URLs", outcome.urls.len());
        outcome
    }

    /// Fetches and classifies every URL, in order
    ///
    /// Redirects are not followed so that 3xx statuses are recorded. Fetch
    /// failures become error records; the audit never stops early.
    pub async fn audit_urls(&mut self, urls: &[String]) -> AuditReport {
        let timeout = Duration::from_secs(self.config.crawler.request_timeout_secs);
        let start_time = Instant::now();
        let mut report = AuditReport::new();

        for (index, url) in urls.iter().enumerate() {
            tracing::debug!("Auditing: {}", url);

            let outcome = self.fetcher.fetch(url, Method::Get, timeout, false).await;
            if let Err(e) = &outcome {
                tracing::warn!("Error fetching {}: {}", url, e);
            }
            report.add(classify(url, &outcome));
            self.politeness.pause().await;

            let audited = index + 1;
            if audited % PROGRESS_INTERVAL == 0 {
                let rate = audited as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {}/{} pages audited, {:.2} pages/sec",
                    audited,
                    urls.len(),
                    rate
                );
            }
        }

        report
    }

    /// Runs a complete audit and returns its summary
    ///
    /// Nothing is written to disk; see [`write_outputs`].
    pub async fn run(&mut self) -> Result<AuditSummary> {
        let started_at = chrono::Utc::now();
        let start_time = Instant::now();

        tracing::info!("Starting audit of {}", self.origin);

        let discovery = self.discover().await;
        let report = self.audit_urls(&discovery.urls).await;

        let finished_at = chrono::Utc::now();
        tracing::info!(
            "Audit completed: {} pages audited in {:?}",
            report.len(),
            start_time.elapsed()
        );

        Ok(AuditSummary {
            origin: self.origin.to_string(),
            started_at: started_at.to_rfc3339(),
            finished_at: Some(finished_at.to_rfc3339()),
            duration_seconds: Some(start_time.elapsed().as_secs()),
            config_hash: self.config_hash.clone(),
            contributions: discovery.contributions,
            sitemap_url: discovery.sitemap_url,
            crawled_pages: discovery.crawled_pages,
            report,
        })
    }
}

/// Writes the page report, the issue summary and the markdown summary
///
/// # Arguments
///
/// * `summary` - The finished audit
/// * `output` - Output file locations
pub fn write_outputs(summary: &AuditSummary, output: &OutputConfig) -> Result<()> {
    let report_path = Path::new(&output.report_path);
    let mut sink = CsvReportSink::from_path(report_path)?;
    sink.write_all(&summary.report.rows())?;
    tracing::info!("Report saved to {}", report_path.display());

    let summary_path = Path::new(&output.summary_path);
    write_summary(summary_path, &summary.report.summary_rows())?;
    tracing::info!("Issue summary saved to {}", summary_path.display());

    let markdown_path = Path::new(&output.markdown_path);
    generate_markdown_summary(summary, markdown_path)?;
    tracing::info!("Markdown summary saved to {}", markdown_path.display());

    Ok(())
}

/// Runs an audit and writes every output file
///
/// # Arguments
///
/// * `config` - The audit configuration
/// * `config_hash` - Hash of the configuration file, if one was loaded
pub async fn run_audit(config: Config, config_hash: Option<String>) -> Result<AuditSummary> {
    let output = config.output.clone();
    let mut coordinator = Coordinator::new(config)?.with_config_hash(config_hash);
    let summary = coordinator.run().await?;
    write_outputs(&summary, &output)?;
    Ok(summary)
}
