use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Main configuration structure for rift-harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote API credentials and routing
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// API credential sent with every request (overridden by `RIOT_API_KEY`)
    #[serde(rename = "api-key", default)]
    pub api_key: String,

    /// Base URL for match history, match detail and timeline calls
    #[serde(rename = "match-region-url")]
    pub match_region_url: String,

    /// Host used for rank/mastery calls when a platform has no mapping
    #[serde(rename = "default-platform-domain")]
    pub default_platform_domain: String,

    /// URL scheme for platform hosts
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Platform code (upper case) to platform host
    #[serde(default = "default_platforms")]
    pub platforms: BTreeMap<String, String>,
}

/// Crawl limits and boundary policy
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Player id the frontier is seeded with
    #[serde(rename = "initial-puuid")]
    pub initial_puuid: String,

    /// Target row ceiling for the whole run
    #[serde(rename = "max-rows", default = "default_max_rows")]
    pub max_rows: usize,

    /// Number of new records that triggers a flush
    #[serde(rename = "chunk-size", default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Match ids requested per player
    #[serde(rename = "match-history-count", default = "default_match_history_count")]
    pub match_history_count: u32,

    /// When the row ceiling is checked
    #[serde(rename = "ceiling-policy", default)]
    pub ceiling_policy: CeilingPolicy,

    /// Log a progress line every this many records
    #[serde(rename = "progress-interval", default = "default_progress_interval")]
    pub progress_interval: usize,
}

/// When the crawl loop compares the record total against the row ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CeilingPolicy {
    /// Only between matches; a match crossing the ceiling is kept whole
    #[default]
    EndOfMatch,

    /// After every appended record; the run stops on the exact ceiling
    PerRecord,
}

/// Fetch client throughput and retry settings
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(rename = "requests-per-window", default = "default_requests_per_window")]
    pub requests_per_window: u32,

    #[serde(rename = "window-ms", default = "default_window_ms")]
    pub window_ms: u64,

    /// Total attempts for one call, including the first
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(rename = "server-error-cooldown-ms", default = "default_server_error_cooldown_ms")]
    pub server_error_cooldown_ms: u64,

    #[serde(rename = "transport-error-delay-ms", default = "default_transport_error_delay_ms")]
    pub transport_error_delay_ms: u64,

    /// Wait used on 429 when the server sends no usable Retry-After
    #[serde(rename = "default-retry-after-secs", default = "default_retry_after_secs")]
    pub default_retry_after_secs: u64,

    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl FetchConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn server_error_cooldown(&self) -> Duration {
        Duration::from_millis(self.server_error_cooldown_ms)
    }

    pub fn transport_error_delay(&self) -> Duration {
        Duration::from_millis(self.transport_error_delay_ms)
    }

    pub fn default_retry_after(&self) -> Duration {
        Duration::from_secs(self.default_retry_after_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            requests_per_window: default_requests_per_window(),
            window_ms: default_window_ms(),
            max_attempts: default_max_attempts(),
            server_error_cooldown_ms: default_server_error_cooldown_ms(),
            transport_error_delay_ms: default_transport_error_delay_ms(),
            default_retry_after_secs: default_retry_after_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Output artifact settings
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the CSV artifacts are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// File name prefix; artifacts are `<prefix>_<count>.csv`
    #[serde(rename = "file-prefix", default = "default_file_prefix")]
    pub file_prefix: String,

    #[serde(default)]
    pub mode: OutputMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            file_prefix: default_file_prefix(),
            mode: OutputMode::default(),
        }
    }
}

/// What each flush writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Every record so far; the previous artifact is deleted
    #[default]
    Cumulative,

    /// Only the records since the last flush; earlier artifacts are kept
    Delta,
}

fn default_scheme() -> String {
    "https".to_string()
}

/// Built-in platform routing table
pub fn default_platforms() -> BTreeMap<String, String> {
    [
        ("EUW1", "euw1.api.riotgames.com"),
        ("EUN1", "eun1.api.riotgames.com"),
        ("NA1", "na1.api.riotgames.com"),
        ("KR", "kr.api.riotgames.com"),
        ("TR1", "tr1.api.riotgames.com"),
        ("RU", "ru.api.riotgames.com"),
        ("BR1", "br1.api.riotgames.com"),
        ("LA1", "la1.api.riotgames.com"),
        ("LA2", "la2.api.riotgames.com"),
        ("OC1", "oc1.api.riotgames.com"),
    ]
    .into_iter()
    .map(|(code, host)| (code.to_string(), host.to_string()))
    .collect()
}

fn default_max_rows() -> usize {
    200_000
}

fn default_chunk_size() -> usize {
    50
}

fn default_match_history_count() -> u32 {
    20
}

fn default_progress_interval() -> usize {
    50
}

fn default_requests_per_window() -> u32 {
    15
}

fn default_window_ms() -> u64 {
    1000
}

fn default_max_attempts() -> u32 {
    5
}

fn default_server_error_cooldown_ms() -> u64 {
    5000
}

fn default_transport_error_delay_ms() -> u64 {
    2000
}

fn default_retry_after_secs() -> u64 {
    1
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_output_directory() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    "new_league_data".to_string()
}
