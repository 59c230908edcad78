//! Global request throughput ceiling
//!
//! A fixed-window limiter: at most `capacity` acquisitions per `window`.
//! One instance is shared by every call the fetch client makes, regardless
//! of endpoint.

use std::time::Duration;
use tokio::time::Instant;

/// Fixed-window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum acquisitions per window
    capacity: u32,

    /// Window length
    window: Duration,

    /// Start of the current window, if any request has been made
    window_start: Option<Instant>,

    /// Acquisitions consumed in the current window
    used: u32,
}

impl RateLimiter {
    /// Creates a limiter allowing `capacity` requests per `window`
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            window,
            window_start: None,
            used: 0,
        }
    }

    /// Waits until a slot is free in the current or next window, then takes it
    pub async fn acquire(&mut self) {
        if let Some(wait) = self.time_until_available(Instant::now()) {
            tracing::trace!("Rate limiter full, waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }

        let now = Instant::now();
        match self.window_start {
            Some(start) if now.duration_since(start) < self.window => {}
            _ => {
                self.window_start = Some(now);
                self.used = 0;
            }
        }
        self.used += 1;
    }

    /// Returns how long a caller would have to wait at `now`, or None if a slot is free
    pub fn time_until_available(&self, now: Instant) -> Option<Duration> {
        let start = self.window_start?;
        let elapsed = now.duration_since(start);

        if elapsed >= self.window || self.used < self.capacity {
            return None;
        }

        Some(self.window - elapsed)
    }

    /// Slots still free in the current window
    pub fn remaining(&self, now: Instant) -> u32 {
        match self.window_start {
            Some(start) if now.duration_since(start) < self.window => {
                self.capacity.saturating_sub(self.used)
            }
            _ => self.capacity,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
