use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Keys kept before stale ones are swept on the next check.
const SWEEP_THRESHOLD: usize = 1024;

/// In-memory sliding-window limiter keyed by (bucket, client).
pub struct RateLimiter {
    entries: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        RateLimiter {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt for `client` in `bucket`; true if it is under the limit.
    pub fn check_and_record(
        &self,
        bucket: &str,
        client: &str,
        max_attempts: u64,
        window: Duration,
    ) -> bool {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        if map.len() > SWEEP_THRESHOLD {
            map.retain(|_, attempts| {
                attempts.retain(|t| now.duration_since(*t) < window);
                !attempts.is_empty()
            });
        }

        let attempts = map.entry(format!("{}:{}", bucket, client)).or_default();
        attempts.retain(|t| now.duration_since(*t) < window);

        if (attempts.len() as u64) < max_attempts {
            attempts.push(now);
            true
        } else {
            false
        }
    }
}
