use crate::url::matcher::is_same_origin;
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// A normalized `scheme://host[:port]` prefix identifying the audited site
///
/// Every URL admitted to the frontier must start with this string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    prefix: String,
}

impl Origin {
    /// Builds an origin from a bare domain or a full URL
    ///
    /// # Normalization Steps
    ///
    /// 1. Trim whitespace and trailing slashes
    /// 2. Assume `https://` when no scheme is given
    /// 3. Parse; reject non-HTTP(S) schemes and URLs without a host
    /// 4. Keep scheme, lowercased host and explicit port; drop path, query
    ///    and fragment
    ///
    /// # Examples
    ///
    /// ```
    /// use indexscope::url::Origin;
    ///
    /// let origin = Origin::parse("Example.COM/").unwrap();
    /// assert_eq!(origin.as_str(), "https://example.com");
    ///
    /// let local = Origin::parse("http://127.0.0.1:8080/some/page").unwrap();
    /// assert_eq!(local.as_str(), "http://127.0.0.1:8080");
    /// ```
    pub fn parse(input: &str) -> UrlResult<Self> {
        let trimmed = input.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(UrlError::MissingDomain);
        }

        let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else if trimmed.contains("://") {
            let scheme = trimmed.split("://").next().unwrap_or_default();
            return Err(UrlError::InvalidScheme(scheme.to_string()));
        } else {
            format!("https://{}", trimmed)
        };

        let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = url.host_str().ok_or(UrlError::MissingDomain)?;
        let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();

        Ok(Self {
            prefix: format!("{}://{}{}", url.scheme(), host.to_lowercase(), port),
        })
    }

    /// The origin's string form, without a trailing slash
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// The site root, used as the crawl starting point
    pub fn homepage(&self) -> String {
        format!("{}/", self.prefix)
    }

    /// Appends an absolute path (starting with `/`) to the origin
    pub fn join_path(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }

    /// Returns true if `url` belongs to this origin
    pub fn contains(&self, url: &str) -> bool {
        is_same_origin(&self.prefix, url)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}
