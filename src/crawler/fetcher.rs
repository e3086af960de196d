//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the auditor, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for sitemaps, crawl pages and audited pages
//! - HEAD requests for pattern probing
//! - Choosing between redirect-following and first-hop clients
//! - Bounded retry for transient failures

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Maximum redirect hops followed by the discovery client
const MAX_REDIRECTS: usize = 10;

/// HTTP method used for a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Head => reqwest::Method::HEAD,
        }
    }
}

/// A response received from the server
///
/// `status` is whatever the server answered, including 3xx when the fetch
/// did not follow redirects. `body` is `None` for HEAD requests.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The URL that was requested
    pub url: String,

    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HeaderMap,

    /// Response body bytes
    pub body: Option<Vec<u8>>,
}

impl FetchResult {
    /// Returns a header value as a string, if present and valid
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns true when the response claims (or does not deny) HTML content
    ///
    /// A missing Content-Type header is treated as HTML.
    pub fn is_html(&self) -> bool {
        match self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            Some(content_type) => content_type.to_ascii_lowercase().contains("html"),
            None => true,
        }
    }

    /// The body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        self.body
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }
}

/// Broad class of a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The request exceeded its timeout
    Timeout,
    /// Connection refused, DNS failure, TLS failure
    Connect,
    /// Anything else (invalid URL, broken body, redirect loop)
    Other,
}

impl FetchErrorKind {
    /// Returns true if another attempt might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connect)
    }
}

/// A fetch that produced no response
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    /// The URL that was requested
    pub url: String,

    /// Human-readable error description
    pub message: String,

    /// Error classification
    pub kind: FetchErrorKind,

    /// Number of attempts made before giving up
    pub attempts: u32,
}

impl FetchError {
    fn from_reqwest(url: &str, error: &reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            FetchErrorKind::Timeout
        } else if error.is_connect() {
            FetchErrorKind::Connect
        } else {
            FetchErrorKind::Other
        };

        Self {
            url: url.to_string(),
            message: error.to_string(),
            kind,
            attempts: 1,
        }
    }
}

/// Formats the user agent string: `Name/Version (+ContactURL)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    )
}

/// Builds an HTTP client with the given redirect policy
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `redirects` - Redirect policy for every request made by this client
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig, redirects: Policy) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .connect_timeout(Duration::from_secs(10))
        .redirect(redirects)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs HTTP requests for every stage of an audit
///
/// Two clients are held because reqwest fixes the redirect policy per
/// client: discovery needs final content, classification needs the first
/// hop's status.
#[derive(Debug, Clone)]
pub struct Fetcher {
    following: Client,
    first_hop: Client,
    max_retries: u32,
    retry_backoff: Duration,
}

impl Fetcher {
    /// Creates a fetcher from the user agent and crawler configuration
    pub fn new(user_agent: &UserAgentConfig, crawler: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            following: build_http_client(user_agent, Policy::limited(MAX_REDIRECTS))?,
            first_hop: build_http_client(user_agent, Policy::none())?,
            max_retries: crawler.max_retries,
            retry_backoff: Duration::from_millis(crawler.retry_backoff_ms),
        })
    }

    /// Fetches a URL
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Any HTTP response | Returned as-is, never retried |
    /// | Timeout | Retry up to `max-retries` times |
    /// | Connection failure | Retry up to `max-retries` times |
    /// | Other errors | Immediate `FetchError` |
    ///
    /// The delay before attempt `n` is `retry-backoff-ms * n`.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    /// * `method` - GET or HEAD
    /// * `timeout` - Total time allowed for each attempt
    /// * `follow_redirects` - Whether 3xx responses are followed
    pub async fn fetch(
        &self,
        url: &str,
        method: Method,
        timeout: Duration,
        follow_redirects: bool,
    ) -> Result<FetchResult, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url, method, timeout, follow_redirects).await {
                Ok(result) => return Ok(result),
                Err(error) if error.kind.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::debug!(
                        "Retrying {} (attempt {} of {}): {}",
                        url,
                        attempt,
                        self.max_retries,
                        error
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                Err(mut error) => {
                    error.attempts = attempt + 1;
                    return Err(error);
                }
            }
        }
    }

    async fn fetch_once(
        &self,
        url: &str,
        method: Method,
        timeout: Duration,
        follow_redirects: bool,
    ) -> Result<FetchResult, FetchError> {
        let client = if follow_redirects {
            &self.following
        } else {
            &self.first_hop
        };

        let response = client
            .request(method.as_reqwest(), url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();

        let body = match method {
            Method::Head => None,
            Method::Get => Some(
                response
                    .bytes()
                    .await
                    .map_err(|e| FetchError::from_reqwest(url, &e))?
                    .to_vec(),
            ),
        };

        Ok(FetchResult {
            url: url.to_string(),
            status,
            headers,
            body,
        })
    }
}
