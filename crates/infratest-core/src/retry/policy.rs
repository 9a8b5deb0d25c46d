use std::time::Duration;

use crate::config::RetryConfig;

/// Fixed-interval retry policy.
///
/// The engine invokes the action up to `max_retries + 1` times and sleeps
/// `sleep_between` between attempts (never after the last one). Call sites
/// rely on the predictable minimum total wait, so there is no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Zero means exactly one attempt.
    pub max_retries: u32,
    /// Pause between consecutive attempts.
    pub sleep_between: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 30,
            sleep_between: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, sleep_between: Duration) -> Self {
        Self {
            max_retries,
            sleep_between,
        }
    }

    /// Total attempt budget (`max_retries + 1`).
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Upper bound on time spent sleeping for a fully exhausted run.
    pub fn total_sleep(&self) -> Duration {
        self.sleep_between.saturating_mul(self.max_retries)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        // Negative, NaN or absurdly large values fall back to no sleep.
        let sleep_between =
            Duration::try_from_secs_f64(cfg.sleep_between_secs).unwrap_or(Duration::ZERO);
        Self {
            max_retries: cfg.max_retries,
            sleep_between,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_retries_is_one_attempt() {
        let p = RetryPolicy::new(0, Duration::from_secs(5));
        assert_eq!(p.attempts(), 1);
        assert_eq!(p.total_sleep(), Duration::ZERO);
    }

    #[test]
    fn attempts_saturate() {
        let p = RetryPolicy::new(u32::MAX, Duration::ZERO);
        assert_eq!(p.attempts(), u32::MAX);
    }

    #[test]
    fn from_config() {
        let cfg = RetryConfig {
            max_retries: 3,
            sleep_between_secs: 0.5,
        };
        let p = RetryPolicy::from(&cfg);
        assert_eq!(p.max_retries, 3);
        assert_eq!(p.sleep_between, Duration::from_millis(500));
        assert_eq!(p.total_sleep(), Duration::from_millis(1500));
    }

    #[test]
    fn negative_sleep_in_config_clamps_to_zero() {
        let cfg = RetryConfig {
            max_retries: 1,
            sleep_between_secs: -2.0,
        };
        assert_eq!(RetryPolicy::from(&cfg).sleep_between, Duration::ZERO);
    }
}
