//! Rate-limited, retrying HTTP client
//!
//! Every request the harvester makes goes through [`FetchClient::fetch`]:
//! - one shared fixed-window limiter slot per attempt
//! - response classification
//! - bounded retry for throttling, server errors and transport failures

use crate::config::FetchConfig;
use crate::fetch::limiter::RateLimiter;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Permanent outcome of a fetch; callers treat every variant as "missing"
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Exceeded max attempts ({attempts}) for {url}")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed response from {url}: {message}")]
    Malformed { url: String, message: String },

    #[error("Invalid request for {url}: {message}")]
    Request { url: String, message: String },
}

/// How a response status is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx, body is returned to the caller
    Success,

    /// 429, wait for Retry-After then retry
    Throttled,

    /// 5xx, wait the server-error cooldown then retry
    ServerError,

    /// Anything else; no retry
    Terminal,
}

/// Classifies a response status
pub fn classify_status(status: StatusCode) -> StatusClass {
    if status.is_success() {
        StatusClass::Success
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        StatusClass::Throttled
    } else if status.is_server_error() {
        StatusClass::ServerError
    } else {
        StatusClass::Terminal
    }
}

/// Reads the server-declared wait from `Retry-After` (integer seconds)
///
/// Falls back to `default` when the header is missing or not a number.
pub fn parse_retry_after(headers: &HeaderMap, default: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// Retry ceiling and fixed delays
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts for one call, including the first
    pub max_attempts: u32,

    /// Sleep after a 5xx
    pub server_error_cooldown: Duration,

    /// Sleep after a connection error or timeout
    pub transport_error_delay: Duration,

    /// Sleep after a 429 that carries no usable Retry-After
    pub default_retry_after: Duration,
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            server_error_cooldown: config.server_error_cooldown(),
            transport_error_delay: config.transport_error_delay(),
            default_retry_after: config.default_retry_after(),
        }
    }
}

/// Snapshot of the client's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Attempts sent, retries included
    pub requests: u64,
    pub throttled: u64,
    pub server_errors: u64,
    pub transport_errors: u64,
    /// Calls that ended on a non-retryable status
    pub terminal_failures: u64,
    /// Calls that used up every attempt
    pub exhausted: u64,
}

#[derive(Debug, Default)]
struct FetchCounters {
    requests: AtomicU64,
    throttled: AtomicU64,
    server_errors: AtomicU64,
    transport_errors: AtomicU64,
    terminal_failures: AtomicU64,
    exhausted: AtomicU64,
}

impl FetchCounters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> FetchStats {
        FetchStats {
            requests: self.requests.load(Ordering::Relaxed),
            throttled: self.throttled.load(Ordering::Relaxed),
            server_errors: self.server_errors.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            terminal_failures: self.terminal_failures.load(Ordering::Relaxed),
            exhausted: self.exhausted.load(Ordering::Relaxed),
        }
    }
}

/// Builds the underlying HTTP client
///
/// # Example
///
/// ```no_run
/// use rift_harvest::fetch::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("rift-harvest/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// HTTP client behind a shared rate limiter with bounded retries
pub struct FetchClient {
    http: Client,
    limiter: Mutex<RateLimiter>,
    policy: RetryPolicy,
    counters: FetchCounters,
}

impl FetchClient {
    pub fn new(http: Client, limiter: RateLimiter, policy: RetryPolicy) -> Self {
        Self {
            http,
            limiter: Mutex::new(limiter),
            policy,
            counters: FetchCounters::default(),
        }
    }

    /// Builds a client from the `[fetch]` configuration section
    pub fn from_config(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let http = build_http_client(config.request_timeout())?;
        let limiter = RateLimiter::new(config.requests_per_window, config.window());
        Ok(Self::new(http, limiter, RetryPolicy::from(config)))
    }

    pub fn stats(&self) -> FetchStats {
        self.counters.snapshot()
    }

    /// Sends a request and returns the body of a 2xx response
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 2xx | Return body |
    /// | HTTP 429 | Sleep Retry-After (default 1s), retry |
    /// | HTTP 5xx | Sleep server-error cooldown, retry |
    /// | Connection error / timeout | Sleep transport delay, retry |
    /// | Any other status | Return `FetchError::Status` |
    /// | Attempts used up | Return `FetchError::RetriesExhausted` |
    ///
    /// Each attempt takes one limiter slot. No sleep follows the last attempt.
    pub async fn fetch(
        &self,
        url: &str,
        method: Method,
        params: &[(&str, String)],
        headers: &HeaderMap,
    ) -> Result<String, FetchError> {
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            self.limiter.lock().await.acquire().await;
            FetchCounters::bump(&self.counters.requests);

            let last_attempt = attempt == max_attempts;
            let sent = self
                .http
                .request(method.clone(), url)
                .query(params)
                .headers(headers.clone())
                .send()
                .await;

            let response = match sent {
                Ok(response) => response,
                Err(e) if e.is_builder() => {
                    return Err(FetchError::Request {
                        url: url.to_string(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    FetchCounters::bump(&self.counters.transport_errors);
                    tracing::warn!(
                        "Transport error {} (URL: {}), attempt {}/{}",
                        e,
                        url,
                        attempt,
                        max_attempts
                    );
                    if !last_attempt {
                        tokio::time::sleep(self.policy.transport_error_delay).await;
                    }
                    continue;
                }
            };

            let status = response.status();
            match classify_status(status) {
                StatusClass::Success => match response.text().await {
                    Ok(body) => return Ok(body),
                    Err(e) => {
                        FetchCounters::bump(&self.counters.transport_errors);
                        tracing::warn!("Failed reading body: {} (URL: {})", e, url);
                        if !last_attempt {
                            tokio::time::sleep(self.policy.transport_error_delay).await;
                        }
                    }
                },
                StatusClass::Throttled => {
                    FetchCounters::bump(&self.counters.throttled);
                    let wait =
                        parse_retry_after(response.headers(), self.policy.default_retry_after);
                    tracing::warn!("[429] Rate limit reached. Waiting {:?} (URL: {})", wait, url);
                    if !last_attempt {
                        tokio::time::sleep(wait).await;
                    }
                }
                StatusClass::ServerError => {
                    FetchCounters::bump(&self.counters.server_errors);
                    tracing::warn!(
                        "[{}] Server error. Waiting {:?} (URL: {})",
                        status.as_u16(),
                        self.policy.server_error_cooldown,
                        url
                    );
                    if !last_attempt {
                        tokio::time::sleep(self.policy.server_error_cooldown).await;
                    }
                }
                StatusClass::Terminal => {
                    FetchCounters::bump(&self.counters.terminal_failures);
                    let body = response.text().await.unwrap_or_default();
                    tracing::warn!("[{}] {} (URL: {})", status.as_u16(), body.trim(), url);
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
            }
        }

        FetchCounters::bump(&self.counters.exhausted);
        tracing::error!(
            "Exceeded max attempts ({}) for URL: {}",
            max_attempts,
            url
        );
        Err(FetchError::RetriesExhausted {
            url: url.to_string(),
            attempts: max_attempts,
        })
    }

    /// GETs a URL and deserializes the JSON body
    ///
    /// A 2xx body that does not parse as `T` is `FetchError::Malformed`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        headers: &HeaderMap,
    ) -> Result<T, FetchError> {
        let body = self.fetch(url, Method::GET, params, headers).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Malformed {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
