use serde::Deserialize;

/// Domain audited when neither the CLI nor a config file names one
pub const DEFAULT_DOMAIN: &str = "hammondproperties.com.au";

/// Main configuration structure
///
/// Every section and key is optional; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// The site under audit
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Bare domain or base URL (e.g. "example.com" or "http://localhost:8080")
    pub domain: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum link depth followed from the homepage
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Hard cap on the number of discovered URLs
    #[serde(rename = "max-urls")]
    pub max_urls: usize,

    /// Pause after every crawl and audit fetch (milliseconds, 0 disables)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Timeout for GET requests (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Timeout for pattern-probe HEAD requests (seconds)
    #[serde(rename = "probe-timeout-secs")]
    pub probe_timeout_secs: u64,

    /// Extra attempts after a timeout or connection failure
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base backoff between retries, multiplied by the attempt number (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_urls: 500,
            politeness_delay_ms: 500,
            request_timeout_secs: 10,
            probe_timeout_secs: 5,
            max_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "indexscope".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/indexscope/indexscope".to_string(),
        }
    }
}

/// Output file locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Page-by-page audit report (CSV)
    #[serde(rename = "report-path")]
    pub report_path: String,

    /// Issue-category counts (CSV)
    #[serde(rename = "summary-path")]
    pub summary_path: String,

    /// Human-readable run summary (markdown)
    #[serde(rename = "markdown-path")]
    pub markdown_path: String,

    /// 404 redirect mapping (CSV)
    #[serde(rename = "redirects-map-path")]
    pub redirects_map_path: String,

    /// Server rewrite rules for the 404 redirects
    #[serde(rename = "rewrite-rules-path")]
    pub rewrite_rules_path: String,

    /// Pages whose canonical tag needs fixing (CSV)
    #[serde(rename = "canonical-fixes-path")]
    pub canonical_fixes_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "audit_report.csv".to_string(),
            summary_path: "issue_summary.csv".to_string(),
            markdown_path: "audit_summary.md".to_string(),
            redirects_map_path: "redirects_map.csv".to_string(),
            rewrite_rules_path: "htaccess_rules.txt".to_string(),
            canonical_fixes_path: "canonical_fixes_required.csv".to_string(),
        }
    }
}
