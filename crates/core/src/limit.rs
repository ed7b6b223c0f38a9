//! Fixed-window per-client rate limiter.
//!
//! One counter per client key, reset when the 60-second window lapses.
//! This table is the only shared mutable state in the process; everything
//! else is read-only after startup.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default window length.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Keep the bucket table from growing unbounded under many distinct clients.
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    started: Instant,
    count: u32,
}

/// Fixed-window counter keyed by client identity.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl RateLimiter {
    /// Create a limiter allowing `max_requests` per 60-second window.
    pub fn new(max_requests: u32) -> Self {
        Self::with_window(max_requests, WINDOW)
    }

    /// Create a limiter with an explicit window (used by tests).
    pub fn with_window(max_requests: u32, window: Duration) -> Self {
        Self { max_requests, window, buckets: Mutex::new(HashMap::new()) }
    }

    /// Increment-and-check for one request from `key`.
    ///
    /// Returns `true` if the request is within the window's budget.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut buckets = self.buckets.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if buckets.len() > SWEEP_THRESHOLD {
            let window = self.window;
            buckets.retain(|_, b| now.duration_since(b.started) < window);
        }

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket { started: now, count: 0 });

        if now.duration_since(bucket.started) >= self.window {
            bucket.started = now;
            bucket.count = 0;
        }

        bucket.count += 1;
        bucket.count <= self.max_requests
    }
}
