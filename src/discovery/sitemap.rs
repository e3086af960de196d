//! Sitemap discovery pass
//!
//! Well-known sitemap locations are tried in order. The first one that
//! answers 200 with well-formed XML contributes every `<loc>` value on the
//! audited origin, and no further candidates are fetched. Sitemap indexes
//! are not expanded: their child sitemap URLs are added as plain entries.

use crate::crawler::Method;
use crate::discovery::DiscoveryEngine;
use crate::state::Frontier;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::Duration;
use thiserror::Error;

/// Sitemap locations tried, in order
pub const SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/wp-sitemap.xml",
    "/property-sitemap.xml",
];

/// Reasons a sitemap body is rejected
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid text content: {0}")]
    Text(String),

    #[error("Document has no root element")]
    NoRoot,

    #[error("Document ended with {0} unclosed element(s)")]
    Unclosed(usize),

    #[error("Content outside the root element")]
    OutsideRoot,
}

/// Extracts every `loc` element's text from a sitemap or sitemap index
///
/// Elements are matched on their local name, so namespaced tags such as
/// `<sm:loc>` count. Values are trimmed; empty values are dropped. The whole
/// document must be well formed, otherwise nothing is returned: exactly one
/// root element, and nothing but whitespace, comments or processing
/// instructions around it.
///
/// # Example
///
/// ```
/// use indexscope::discovery::parse_sitemap;
///
/// let xml = r#"<urlset><url><loc> https://example.com/a </loc></url></urlset>"#;
/// assert_eq!(parse_sitemap(xml).unwrap(), vec!["https://example.com/a".to_string()]);
/// ```
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, SitemapError> {
    let mut reader = Reader::from_str(xml);

    let mut locs = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut root_closed = false;
    let mut current_loc: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root_closed {
                    return Err(SitemapError::OutsideRoot);
                }
                seen_root = true;
                depth += 1;
                if start.local_name().as_ref() == b"loc" {
                    current_loc = Some(String::new());
                }
            }
            Event::Empty(_) => {
                if root_closed {
                    return Err(SitemapError::OutsideRoot);
                }
                seen_root = true;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(text) => {
                if depth == 0 {
                    if !is_blank(&text) {
                        return Err(SitemapError::OutsideRoot);
                    }
                } else if let Some(loc) = current_loc.as_mut() {
                    let value = text
                        .unescape()
                        .map_err(|e| SitemapError::Text(e.to_string()))?;
                    loc.push_str(&value);
                }
            }
            Event::CData(cdata) => {
                if depth == 0 {
                    if !is_blank(&cdata) {
                        return Err(SitemapError::OutsideRoot);
                    }
                } else if let Some(loc) = current_loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
                if end.local_name().as_ref() == b"loc" {
                    if let Some(loc) = current_loc.take() {
                        let loc = loc.trim();
                        if !loc.is_empty() {
                            locs.push(loc.to_string());
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(SitemapError::NoRoot);
    }
    if depth > 0 {
        return Err(SitemapError::Unclosed(depth));
    }

    Ok(locs)
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

impl DiscoveryEngine<'_> {
    /// Runs the sitemap pass
    ///
    /// Returns the sitemap URL that was used, if any.
    pub(crate) async fn sitemap_pass(&mut self, frontier: &mut Frontier) -> Option<String> {
        let timeout = Duration::from_secs(self.config.request_timeout_secs);

        for path in SITEMAP_PATHS {
            let sitemap_url = frontier.origin().join_path(path);
            tracing::debug!("Checking sitemap: {}", sitemap_url);

            let response = match self
                .fetcher
                .fetch(&sitemap_url, Method::Get, timeout, true)
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!("No sitemap at {}: {}", sitemap_url, e);
                    continue;
                }
            };

            if response.status != 200 {
                tracing::debug!("No sitemap at {} (HTTP {})", sitemap_url, response.status);
                continue;
            }

            match parse_sitemap(&response.text()) {
                Ok(locs) => {
                    let added = locs
                        .iter()
                        .filter(|loc| frontier.insert(loc).is_added())
                        .count();
                    tracing::info!(
                        "Found {} URLs in sitemap {} ({} on origin and new)",
                        locs.len(),
                        sitemap_url,
                        added
                    );
                    return Some(sitemap_url);
                }
                Err(e) => {
                    tracing::debug!("Ignoring malformed sitemap at {}: {}", sitemap_url, e);
                }
            }
        }

        tracing::info!("No usable sitemap found");
        None
    }
}
