//! Request pacing
//!
//! Every crawl-mode and audit-mode fetch is followed by a fixed pause so the
//! audited server sees at most one request per delay window. A zero delay
//! turns pacing off, which is what the tests use.

use crate::config::CrawlerConfig;
use std::time::Duration;

/// Fixed post-fetch delay with request bookkeeping
#[derive(Debug, Clone)]
pub struct Politeness {
    /// Pause after each fetch
    delay: Duration,

    /// Number of requests paced so far
    request_count: u64,
}

impl Politeness {
    /// Creates a pacer with an explicit delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            request_count: 0,
        }
    }

    /// Creates a pacer from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(Duration::from_millis(config.politeness_delay_ms))
    }

    /// Creates a pacer that never sleeps
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Returns true if pausing is a no-op
    pub fn is_disabled(&self) -> bool {
        self.delay.is_zero()
    }

    /// The configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a finished request and sleeps for the configured delay
    pub async fn pause(&mut self) {
        self.request_count += 1;
        if !self.is_disabled() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Number of requests paced so far
    pub fn request_count(&self) -> u64 {
        self.request_count
    }
}
