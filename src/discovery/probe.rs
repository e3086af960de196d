//! Pattern probing of common site sections

use crate::crawler::Method;
use crate::discovery::DiscoveryEngine;
use crate::state::Frontier;
use std::time::Duration;

/// Section paths probed with HEAD requests, in order
pub const PROBE_PATHS: &[&str] = &[
    "/properties/",
    "/property/",
    "/listings/",
    "/listing/",
    "/accommodation/",
    "/rooms/",
    "/about/",
    "/contact/",
    "/blog/",
    "/news/",
    "/gallery/",
    "/location/",
    "/amenities/",
    "/rates/",
    "/booking/",
    "/availability/",
];

impl DiscoveryEngine<'_> {
    /// Adds every probe path that answers 200 after redirects
    ///
    /// The probe URL itself is recorded, not the redirect target.
    pub(crate) async fn pattern_probe_pass(&mut self, frontier: &mut Frontier) {
        let timeout = Duration::from_secs(self.config.probe_timeout_secs);

        for path in PROBE_PATHS {
            if frontier.is_full() {
                break;
            }

            let probe_url = frontier.origin().join_path(path);
            if frontier.contains(&probe_url) {
                continue;
            }

            match self.fetcher.fetch(&probe_url, Method::Head, timeout, true).await {
                Ok(response) if response.status == 200 => {
                    tracing::debug!("Probe hit: {}", probe_url);
                    frontier.insert(&probe_url);
                }
                Ok(response) => {
                    tracing::trace!("Probe miss: {} (HTTP {})", probe_url, response.status);
                }
                Err(e) => {
                    tracing::trace!("Probe failed: {}: {}", probe_url, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_paths_are_sections() {
        assert_eq!(PROBE_PATHS.len(), 16);
        for path in PROBE_PATHS {
            assert!(path.starts_with('/') && path.ends_with('/'), "{path}");
        }
    }
}
