use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable that overrides `api.api-key`
pub const API_KEY_ENV: &str = "RIOT_API_KEY";

/// Loads and parses a configuration file from the given path
///
/// The `RIOT_API_KEY` environment variable, when set and non-empty, replaces
/// the key from the file before validation.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use rift_harvest::config::load_config;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Max rows: {}", config.crawl.max_rows);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Replaces the API key with `RIOT_API_KEY` when that is set and non-empty
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.api.api_key = key;
        }
    }
}

/// Parses configuration text without touching the environment or validating
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so runs can be matched to the config that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
