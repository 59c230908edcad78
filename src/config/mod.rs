//! Configuration module for rift-harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use rift_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Harvest will stop at {} rows", config.crawl.max_rows);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_platforms, ApiConfig, CeilingPolicy, Config, CrawlConfig, FetchConfig, OutputConfig,
    OutputMode,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, parse_config, API_KEY_ENV,
};
pub use validation::validate;
