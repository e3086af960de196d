//! Indexscope main entry point
//!
//! This is the command-line interface for the Indexscope site auditor.

use clap::Parser;
use indexscope::config::{load_optional_config, validate, Config};
use indexscope::crawler::run_audit;
use indexscope::discovery::{PROBE_PATHS, SITEMAP_PATHS};
use indexscope::output::print_statistics;
use indexscope::remediation::{
    load_report, plan_canonical_fixes, recommend_redirects, write_canonical_fixes,
    write_redirect_map, write_rules,
};
use indexscope::url::Origin;
use indexscope::AuditError;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Number of redirects listed on the console after generating rules
const REDIRECT_PREVIEW: usize = 5;

/// Indexscope: a search-console style site auditor
///
/// Indexscope discovers the pages of one site through its sitemap, a
/// bounded link crawl and common section paths, then checks each page for
/// the problems that keep pages out of a search index.
#[derive(Parser, Debug)]
#[command(name = "indexscope")]
#[command(version)]
#[command(about = "A search-console style site auditor", long_about = None)]
struct Cli {
    /// Domain or base URL to audit [default: hammondproperties.com.au]
    #[arg(long, value_name = "DOMAIN")]
    domain: Option<String>,

    /// Path of the page report CSV [default: audit_report.csv]
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Generate 301 redirect rules for the 404 pages of an existing report
    #[arg(long, conflicts_with_all = ["canonical_fixes", "dry_run"])]
    redirects: bool,

    /// List pages of an existing report whose canonical tag must change
    #[arg(long, conflicts_with_all = ["redirects", "dry_run"])]
    canonical_fixes: bool,

    /// Validate config and show what would be audited without fetching anything
    #[arg(long, conflicts_with_all = ["redirects", "canonical_fixes"])]
    dry_run: bool,

    /// Do not pause between requests
    #[arg(long)]
    no_delay: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match effective_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    if let Some(hash) = &config_hash {
        tracing::info!("Configuration loaded successfully (hash: {})", hash);
    }

    // Handle different modes
    let result = if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.redirects {
        handle_redirects(&config)
    } else if cli.canonical_fixes {
        handle_canonical_fixes(&config)
    } else {
        handle_audit(config, config_hash).await
    };

    match result {
        Err(AuditError::MissingInput { path }) => {
            eprintln!("Error: {} not found. Run an audit first!", path);
            Ok(())
        }
        other => Ok(other?),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("indexscope=info,warn"),
            1 => EnvFilter::new("indexscope=debug,info"),
            2 => EnvFilter::new("indexscope=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn effective_config(cli: &Cli) -> Result<(Config, Option<String>), AuditError> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let (mut config, hash) = load_optional_config(cli.config.as_deref())?;

    if let Some(domain) = &cli.domain {
        config.site.domain = domain.clone();
    }
    if let Some(output) = &cli.output {
        config.output.report_path = output.display().to_string();
    }
    if cli.no_delay {
        config.crawler.politeness_delay_ms = 0;
    }

    validate(&config)?;
    Ok((config, hash))
}

/// Handles the --dry-run mode: validates config and shows what would be audited
fn handle_dry_run(config: &Config) -> Result<(), AuditError> {
    let origin = Origin::parse(&config.site.domain)?;

    println!("=== Indexscope Dry Run ===\n");

    println!("Site:");
    println!("  Origin: {}", origin);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max URLs: {}", config.crawler.max_urls);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Probe timeout: {}s", config.crawler.probe_timeout_secs);
    println!(
        "  Retries: {} (backoff {}ms)",
        config.crawler.max_retries, config.crawler.retry_backoff_ms
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);
    println!("  Issue summary: {}", config.output.summary_path);
    println!("  Markdown summary: {}", config.output.markdown_path);
    println!("  Redirect map: {}", config.output.redirects_map_path);
    println!("  Rewrite rules: {}", config.output.rewrite_rules_path);
    println!("  Canonical fixes: {}", config.output.canonical_fixes_path);

    println!("\nSitemap Candidates ({}):", SITEMAP_PATHS.len());
    for path in SITEMAP_PATHS {
        println!("  - {}", origin.join_path(path));
    }

    println!("\nCrawl Start:");
    println!("  - {}", origin.homepage());

    println!("\nProbe Paths ({}):", PROBE_PATHS.len());
    for path in PROBE_PATHS {
        println!("  - {}", origin.join_path(path));
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --redirects mode: recommends 301 targets for 404 pages
fn handle_redirects(config: &Config) -> Result<(), AuditError> {
    let origin = Origin::parse(&config.site.domain)?;
    let rows = load_report(Path::new(&config.output.report_path))?;

    println!("Analyzing 404 errors and generating redirect recommendations...");

    let rules = recommend_redirects(&rows, &origin);
    if rules.is_empty() {
        println!("✓ No 404 errors found!");
        return Ok(());
    }
    println!("Found {} pages with 404 errors", rules.len());

    write_redirect_map(Path::new(&config.output.redirects_map_path), &rules)?;
    write_rules(Path::new(&config.output.rewrite_rules_path), &rules)?;

    println!("✓ Generated {} redirect rules", rules.len());
    println!("Files created:");
    println!("  - {} (redirect mapping)", config.output.redirects_map_path);
    println!("  - {} (ready to add to .htaccess)", config.output.rewrite_rules_path);

    println!("\nRedirect Summary:");
    for (i, rule) in rules.iter().take(REDIRECT_PREVIEW).enumerate() {
        println!("{}. {} -> {}", i + 1, rule.old_url, rule.target_url);
    }
    if rules.len() > REDIRECT_PREVIEW {
        println!("   ... and {} more", rules.len() - REDIRECT_PREVIEW);
    }

    Ok(())
}

/// Handles the --canonical-fixes mode: lists pages needing a self-referencing canonical
fn handle_canonical_fixes(config: &Config) -> Result<(), AuditError> {
    let origin = Origin::parse(&config.site.domain)?;
    let rows = load_report(Path::new(&config.output.report_path))?;

    let plan = plan_canonical_fixes(&rows, &origin);
    write_canonical_fixes(Path::new(&config.output.canonical_fixes_path), &plan.fixes)?;

    println!("=== Canonical Tag Review ===\n");
    println!(
        "  {}/{} pages use the homepage as canonical",
        plan.homepage_canonicals, plan.total_rows
    );
    println!("  {} asset files were audited", plan.asset_rows);
    println!("  {} pages need a canonical update", plan.fixes.len());
    println!("\n✓ Fixes written to: {}", config.output.canonical_fixes_path);

    Ok(())
}

/// Handles the main audit operation
async fn handle_audit(config: Config, config_hash: Option<String>) -> Result<(), AuditError> {
    tracing::info!(
        "Auditing {} (max depth {}, max URLs {})",
        config.site.domain,
        config.crawler.max_depth,
        config.crawler.max_urls
    );

    let output = config.output.clone();
    match run_audit(config, config_hash).await {
        Ok(summary) => {
            println!();
            print_statistics(&summary.report);
            println!("\nReport saved to: {}", output.report_path);
            println!("Issue summary saved to: {}", output.summary_path);
            println!("Markdown summary saved to: {}", output.markdown_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Audit failed: {}", e);
            Err(e)
        }
    }
}
