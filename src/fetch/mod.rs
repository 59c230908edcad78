//! Fetch layer: the shared rate limiter and the retrying HTTP client
//!
//! Every remote call in a run funnels through one [`FetchClient`], so the
//! throughput ceiling holds across all endpoints.

mod client;
mod limiter;

pub use client::{
    build_http_client, classify_status, parse_retry_after, FetchClient, FetchError, FetchStats,
    RetryPolicy, StatusClass,
};
pub use limiter::RateLimiter;
