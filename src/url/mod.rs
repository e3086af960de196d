//! URL handling module
//!
//! This module provides origin normalization, same-origin membership tests,
//! and the listing-link heuristic used by the link crawl.

mod matcher;
mod origin;

// Re-export main types and functions
pub use matcher::{is_listing_link, is_same_origin};
pub use origin::Origin;
