//! Attempt budget and exponential backoff for external calls.
//!
//! [`BackoffConfig`] drives [`ResilientInvoker`](crate::retry::ResilientInvoker):
//! how many times a call may be attempted, how long to sleep between
//! attempts, and how long a single attempt may run.

use std::time::Duration;

/// Attempt budget, backoff schedule and per-attempt ceiling.
///
/// The delay after failed attempt `i` (0-indexed) is
/// `initial_delay * multiplier^i`, capped at `max_delay`. With the standard
/// preset that is 1s, 2s, 4s, ...
///
/// # Example
///
/// ```
/// use promo_pipeline::backend::BackoffConfig;
/// use std::time::Duration;
///
/// let standard = BackoffConfig::standard();
/// assert_eq!(standard.max_attempts, 3);
/// assert_eq!(standard.delay_for_attempt(2), Duration::from_secs(4));
///
/// let once = BackoffConfig::none();
/// assert_eq!(once.max_attempts, 1);
/// ```
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Total attempts, including the first. Default: 3. Never below 1.
    pub max_attempts: u32,

    /// Delay after the first failed attempt. Default: 1 second.
    pub initial_delay: Duration,

    /// Growth factor between consecutive delays. Default: 2.0.
    pub multiplier: f64,

    /// Upper bound on a single delay. Default: 60 seconds.
    pub max_delay: Duration,

    /// Ceiling on a single attempt; exceeding it counts as a transport
    /// failure. Default: 120 seconds. `None` disables the ceiling.
    pub attempt_timeout: Option<Duration>,
}

impl BackoffConfig {
    /// Single attempt, no retry.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::standard()
        }
    }

    /// Three attempts, delays of 1s and 2s between them,
    /// two-minute ceiling per attempt.
    pub fn standard() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Duration::from_secs(60),
            attempt_timeout: Some(Duration::from_secs(120)),
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Calculate the delay after failed attempt N (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_secs_f64() * self.multiplier.powi(attempt as i32);
        Duration::from_secs_f64(base.min(self.max_delay.as_secs_f64()))
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self::standard()
    }
}
