//! Page discovery
//!
//! Discovery fills a [`Frontier`] by running three passes in a fixed order:
//!
//! 1. [`DiscoveryPass::Sitemap`]: the first well-formed sitemap found
//! 2. [`DiscoveryPass::LinkCrawl`]: a breadth-first crawl from the homepage
//! 3. [`DiscoveryPass::PatternProbe`]: HEAD probes of common site sections
//!
//! Each pass only adds URLs; the frontier's origin and cap checks apply to
//! every insertion, so a pass that starts with a full frontier adds nothing.

mod link_crawl;
mod probe;
mod sitemap;

pub use probe::PROBE_PATHS;
pub use sitemap::{parse_sitemap, SitemapError, SITEMAP_PATHS};

use crate::config::CrawlerConfig;
use crate::crawler::{Fetcher, Politeness};
use crate::state::Frontier;
use crate::url::Origin;
use std::fmt;

/// One discovery strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryPass {
    Sitemap,
    LinkCrawl,
    PatternProbe,
}

impl DiscoveryPass {
    /// Every pass in execution order
    pub const ORDER: [DiscoveryPass; 3] = [Self::Sitemap, Self::LinkCrawl, Self::PatternProbe];

    /// Human-readable pass name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sitemap => "sitemap",
            Self::LinkCrawl => "link crawl",
            Self::PatternProbe => "pattern probe",
        }
    }
}

impl fmt::Display for DiscoveryPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How many new URLs a pass contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassContribution {
    pub pass: DiscoveryPass,
    pub added: usize,
}

/// Result of running every discovery pass
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// Frozen frontier contents, in discovery order
    pub urls: Vec<String>,

    /// Per-pass contributions, in execution order
    pub contributions: Vec<PassContribution>,

    /// Sitemap that supplied URLs, if any
    pub sitemap_url: Option<String>,

    /// Pages fetched by the link crawl
    pub crawled_pages: usize,
}

impl DiscoveryOutcome {
    /// URLs added by a given pass
    pub fn added_by(&self, pass: DiscoveryPass) -> usize {
        self.contributions
            .iter()
            .filter(|c| c.pass == pass)
            .map(|c| c.added)
            .sum()
    }
}

/// Runs the discovery passes against one origin
pub struct DiscoveryEngine<'a> {
    pub(crate) fetcher: &'a Fetcher,
    pub(crate) config: &'a CrawlerConfig,
    pub(crate) politeness: &'a mut Politeness,
}

impl<'a> DiscoveryEngine<'a> {
    /// Creates an engine sharing the caller's fetcher and pacer
    ///
    /// # Arguments
    ///
    /// * `fetcher` - HTTP fetcher used by every pass
    /// * `config` - Crawl depth, URL cap and timeouts
    /// * `politeness` - Pacer applied after each link-crawl fetch
    pub fn new(fetcher: &'a Fetcher, config: &'a CrawlerConfig, politeness: &'a mut Politeness) -> Self {
        Self {
            fetcher,
            config,
            politeness,
        }
    }

    /// Runs every pass in order and freezes the frontier
    pub async fn discover(&mut self, origin: &Origin) -> DiscoveryOutcome {
        let mut frontier = Frontier::new(origin.clone(), self.config.max_urls);
        let mut contributions = Vec::with_capacity(DiscoveryPass::ORDER.len());
        let mut sitemap_url = None;

        for pass in DiscoveryPass::ORDER {
            let before = frontier.len();
            tracing::info!("Discovery pass: {}", pass);

            match pass {
                DiscoveryPass::Sitemap => sitemap_url = self.sitemap_pass(&mut frontier).await,
                DiscoveryPass::LinkCrawl => self.link_crawl_pass(&mut frontier).await,
                DiscoveryPass::PatternProbe => self.pattern_probe_pass(&mut frontier).await,
            }

            let added = frontier.len() - before;
            tracing::info!("{} pass added {} URLs ({} total)", pass, added, frontier.len());
            contributions.push(PassContribution { pass, added });
        }

        if frontier.is_full() {
            tracing::warn!("URL cap of {} reached during discovery", frontier.cap());
        }

        let crawled_pages = frontier.visited_count();
        DiscoveryOutcome {
            urls: frontier.freeze(),
            contributions,
            sitemap_url,
            crawled_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_order() {
        assert_eq!(
            DiscoveryPass::ORDER,
            [
                DiscoveryPass::Sitemap,
                DiscoveryPass::LinkCrawl,
                DiscoveryPass::PatternProbe
            ]
        );
    }

    #[test]
    fn test_added_by() {
        let outcome = DiscoveryOutcome {
            urls: vec![],
            contributions: vec![
                PassContribution {
                    pass: DiscoveryPass::Sitemap,
                    added: 4,
                },
                PassContribution {
                    pass: DiscoveryPass::LinkCrawl,
                    added: 2,
                },
            ],
            sitemap_url: None,
            crawled_pages: 0,
        };
        assert_eq!(outcome.added_by(DiscoveryPass::Sitemap), 4);
        assert_eq!(outcome.added_by(DiscoveryPass::LinkCrawl), 2);
        assert_eq!(outcome.added_by(DiscoveryPass::PatternProbe), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(DiscoveryPass::PatternProbe.to_string(), "pattern probe");
    }
}
