//! Breadth-first link crawl
//!
//! Starts at the origin's homepage and follows same-origin links up to the
//! configured depth. Every fetch is paced by the shared
//! [`Politeness`](crate::crawler::Politeness). A page that answers at all is
//! marked visited so it is never fetched twice; a page that fails to fetch
//! is left out of the frontier unless another pass found it. Listing-looking
//! anchors are added to the frontier without being queued.

use crate::crawler::{parse_links, Method};
use crate::discovery::DiscoveryEngine;
use crate::state::{Admission, Frontier};
use std::collections::VecDeque;
use std::time::Duration;
use url::Url;

impl DiscoveryEngine<'_> {
    pub(crate) async fn link_crawl_pass(&mut self, frontier: &mut Frontier) {
        let timeout = Duration::from_secs(self.config.request_timeout_secs);
        let max_depth = self.config.max_depth;

        let mut queue: VecDeque<(String, u32)> = VecDeque::new();
        queue.push_back((frontier.origin().homepage(), 0));

        while !frontier.is_full() {
            let Some((url, depth)) = queue.pop_front() else {
                break;
            };

            if depth > max_depth || frontier.is_visited(&url) {
                continue;
            }

            tracing::debug!("Crawling (depth {}): {}", depth, url);

            let response = self.fetcher.fetch(&url, Method::Get, timeout, true).await;
            self.politeness.pause().await;

            let response = match response {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Error crawling {}: {}", url, e);
                    continue;
                }
            };

            if frontier.mark_visited(&url) == Admission::Full {
                break;
            }

            if response.status != 200 || !response.is_html() {
                tracing::debug!("Not following links from {} (HTTP {})", url, response.status);
                continue;
            }

            let base_url = match Url::parse(&url) {
                Ok(base_url) => base_url,
                Err(e) => {
                    tracing::warn!("Cannot resolve links against {}: {}", url, e);
                    continue;
                }
            };

            let parsed = parse_links(&response.text(), &base_url);

            for link in parsed.links {
                if frontier.insert(&link).is_added() && depth < max_depth {
                    queue.push_back((link, depth + 1));
                }
            }

            for link in parsed.listing_links {
                frontier.insert(&link);
            }
        }

        tracing::info!("Link crawl fetched {} pages", frontier.visited_count());
    }
}
