//! Token-bucket rate limiting for upstream API calls
//!
//! Third-party nutrition APIs meter their free tiers per minute. The limiter
//! keeps one bucket per key (usually the upstream endpoint) so a burst of
//! searches cannot exhaust the quota for unrelated calls.
//!
//! # Example
//!
//! ```rust
//! use pantry_core::rate_limit::{RateLimiter, RateLimitConfig};
//!
//! let limiter = RateLimiter::new(RateLimitConfig::per_minute(30));
//!
//! if limiter.try_acquire("foods/search") {
//!     // call the upstream
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Rate limiter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_minute(30)
    }
}

impl RateLimitConfig {
    /// Create a strict rate limit (no burst)
    #[must_use]
    pub fn strict(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            burst: 0,
        }
    }

    /// Per-minute rate limit
    #[must_use]
    pub fn per_minute(max: u32) -> Self {
        Self {
            max_requests: max,
            window: Duration::from_secs(60),
            burst: max / 4,
        }
    }

    fn capacity(&self) -> f64 {
        f64::from(self.max_requests + self.burst)
    }

    fn refill_rate(&self) -> f64 {
        f64::from(self.max_requests) / self.window.as_secs_f64()
    }
}

/// Token bucket state
#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn full(config: &RateLimitConfig) -> Self {
        Self {
            tokens: config.capacity(),
            last_update: Instant::now(),
        }
    }

    fn refill(&mut self, config: &RateLimitConfig) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * config.refill_rate()).min(config.capacity());
        self.last_update = now;
    }
}

/// Rate limiter with one bucket per key
pub struct RateLimiter {
    buckets: RwLock<HashMap<String, TokenBucket>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
            config,
        }
    }

    fn with_bucket<T>(&self, key: &str, f: impl FnOnce(&mut TokenBucket, &RateLimitConfig) -> T) -> T {
        // A poisoned lock still holds valid bucket data
        let mut buckets = self.buckets.write().unwrap_or_else(PoisonError::into_inner);
        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::full(&self.config));
        bucket.refill(&self.config);
        f(bucket, &self.config)
    }

    /// Try to take one token for the given key
    #[must_use]
    pub fn try_acquire(&self, key: &str) -> bool {
        self.with_bucket(key, |bucket, _| {
            if bucket.tokens >= 1.0 {
                bucket.tokens -= 1.0;
                true
            } else {
                false
            }
        })
    }

    /// Tokens currently available for a key
    #[must_use]
    pub fn available(&self, key: &str) -> u32 {
        self.with_bucket(key, |bucket, _| bucket.tokens as u32)
    }

    /// Time until one token is available for a key
    #[must_use]
    pub fn time_until_available(&self, key: &str) -> Duration {
        self.with_bucket(key, |bucket, config| {
            if bucket.tokens >= 1.0 {
                Duration::ZERO
            } else {
                Duration::from_secs_f64((1.0 - bucket.tokens) / config.refill_rate())
            }
        })
    }

    /// Reset rate limit for a key
    pub fn reset(&self, key: &str) {
        self.buckets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_basic() {
        let limiter = RateLimiter::new(RateLimitConfig::strict(3, Duration::from_secs(60)));

        assert!(limiter.try_acquire("search"));
        assert!(limiter.try_acquire("search"));
        assert!(limiter.try_acquire("search"));
        assert!(!limiter.try_acquire("search"));
        assert!(limiter.time_until_available("search") > Duration::ZERO);
    }

    #[test]
    fn test_rate_limiter_with_burst() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window: Duration::from_secs(60),
            burst: 2,
        });

        assert_eq!(limiter.available("search"), 4);
        for _ in 0..4 {
            assert!(limiter.try_acquire("search"));
        }
        assert!(!limiter.try_acquire("search"));
    }

    #[test]
    fn test_rate_limiter_different_keys() {
        let limiter = RateLimiter::new(RateLimitConfig::strict(1, Duration::from_secs(60)));

        assert!(limiter.try_acquire("search"));
        assert!(!limiter.try_acquire("search"));
        assert!(limiter.try_acquire("details"));
    }

    #[test]
    fn test_rate_limiter_reset() {
        let limiter = RateLimiter::new(RateLimitConfig::strict(1, Duration::from_secs(60)));

        assert!(limiter.try_acquire("search"));
        assert!(!limiter.try_acquire("search"));

        limiter.reset("search");
        assert!(limiter.try_acquire("search"));
    }
}
