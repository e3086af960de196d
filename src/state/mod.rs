//! State module for tracking discovery progress
//!
//! # Components
//!
//! - `Frontier`: the deduplicated, same-origin, size-capped set of discovered
//!   URLs, plus the set of URLs the link crawl has already fetched

mod frontier;

// Re-export main types
pub use frontier::{Admission, Frontier};
