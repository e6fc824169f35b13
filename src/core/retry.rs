//! Retry policy for transient failures in outbound API calls
//!
//! One policy value is constructed at startup and applied uniformly to every
//! network call: bounded attempts with exponentially doubling backoff, plus
//! the floor applied to provider rate-limit waits. Rate-limit waits never
//! consume the attempt budget.

use std::time::Duration;

/// Configurable retry policy for outbound API calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts before a transient failure becomes permanent
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles each attempt after that
    pub base_delay: Duration,
    /// Minimum wait honored when the provider signals a rate limit
    pub rate_limit_floor: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            rate_limit_floor: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after the given failed attempt (1-based).
    ///
    /// Doubles per attempt: base, 2x base, 4x base, ... The exponent is
    /// clamped so pathological `max_attempts` values cannot overflow.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay * 2u32.pow(exponent)
    }

    /// Wait duration for a provider rate-limit signal whose reset is
    /// `until_reset` away, clamped up to the configured floor.
    pub fn rate_limit_wait(&self, until_reset: Duration) -> Duration {
        until_reset.max(self.rate_limit_floor)
    }
}
