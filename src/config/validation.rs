use crate::config::types::{ApiConfig, Config, CrawlConfig, FetchConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_crawl_config(&config.crawl)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates credentials and routing
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    if config.api_key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_key cannot be empty (set it in [api] or via RIOT_API_KEY)".to_string(),
        ));
    }

    Url::parse(&config.match_region_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid match_region_url: {}", e)))?;

    if config.scheme != "https" && config.scheme != "http" {
        return Err(ConfigError::Validation(format!(
            "scheme must be 'https' or 'http', got '{}'",
            config.scheme
        )));
    }

    validate_host("default_platform_domain", &config.default_platform_domain, &config.scheme)?;
    for (platform, host) in &config.platforms {
        if platform.is_empty() || platform.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "Platform code '{}' must be non-empty upper case",
                platform
            )));
        }
        validate_host(platform, host, &config.scheme)?;
    }

    Ok(())
}

/// A platform host must form a valid base URL together with the scheme
fn validate_host(name: &str, host: &str, scheme: &str) -> Result<(), ConfigError> {
    if host.is_empty() || host.contains('/') {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must be a bare host, got '{}'",
            name, host
        )));
    }

    Url::parse(&format!("{}://{}", scheme, host))
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid host for {}: {}", name, e)))?;

    Ok(())
}

/// Validates crawl limits
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.initial_puuid.trim().is_empty() {
        return Err(ConfigError::Validation(
            "initial_puuid cannot be empty".to_string(),
        ));
    }

    if config.max_rows < 1 {
        return Err(ConfigError::Validation(format!(
            "max_rows must be >= 1, got {}",
            config.max_rows
        )));
    }

    if config.chunk_size < 1 {
        return Err(ConfigError::Validation(format!(
            "chunk_size must be >= 1, got {}",
            config.chunk_size
        )));
    }

    // The match-v5 history endpoint accepts 0..=100
    if config.match_history_count < 1 || config.match_history_count > 100 {
        return Err(ConfigError::Validation(format!(
            "match_history_count must be between 1 and 100, got {}",
            config.match_history_count
        )));
    }

    if config.progress_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "progress_interval must be >= 1, got {}",
            config.progress_interval
        )));
    }

    Ok(())
}

/// Validates throughput and retry settings
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.requests_per_window < 1 {
        return Err(ConfigError::Validation(format!(
            "requests_per_window must be >= 1, got {}",
            config.requests_per_window
        )));
    }

    if config.window_ms < 1 {
        return Err(ConfigError::Validation(
            "window_ms must be >= 1".to_string(),
        ));
    }

    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.file_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "file_prefix cannot be empty".to_string(),
        ));
    }

    if config.file_prefix.contains('/') || config.file_prefix.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "file_prefix must not contain path separators, got '{}'",
            config.file_prefix
        )));
    }

    Ok(())
}
