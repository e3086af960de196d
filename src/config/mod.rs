//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file is equivalent to an
//! empty one.
//!
//! # Example
//!
//! ```no_run
//! use indexscope::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("indexscope.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig, DEFAULT_DOMAIN,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, load_optional_config, parse_config,
};
pub use validation::validate;
