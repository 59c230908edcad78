//! Rift-Harvest: a rate-limited match-history harvester
//!
//! This crate crawls the League of Legends match API outward from a seed
//! player, enriches every match participant with rank, mastery and terminal
//! champion stats, and persists the flattened rows to CSV in chunks.

pub mod api;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod harvest;
pub mod model;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use harvest::{harvest, Coordinator};
pub use output::{print_statistics, HarvestStatistics};
pub use state::{RunState, StopReason};
