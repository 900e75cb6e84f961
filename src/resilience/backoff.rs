//! Retry pacing between failed probes.
//!
//! The stock policy is a fixed delay with no attempt ceiling. Growth and
//! jitter are opt-in through `[retry]` in the config file.

use std::time::Duration;
use rand::Rng;

use crate::config::schema::RetryConfig;

/// How long to wait between probes and when to give up.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Delay after the first failure.
    pub interval: Duration,
    /// Stop after this many attempts. `None` waits forever.
    pub max_attempts: Option<u32>,
    /// Growth factor per consecutive failure.
    pub multiplier: f64,
    /// Ceiling for the grown delay.
    pub max_interval: Duration,
    /// Add 0-10% random jitter.
    pub jitter: bool,
}

impl RetryPolicy {
    /// Fixed-interval, unbounded policy.
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            multiplier: 1.0,
            max_interval: interval,
            jitter: false,
        }
    }

    /// Same policy with an attempt ceiling.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Whether another probe may run after `attempts` have been made.
    pub fn allows(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts < max,
            None => true,
        }
    }

    /// Delay to sleep after the given number of consecutive failures.
    pub fn delay_for(&self, failures: u32) -> Duration {
        let base_ms = self.interval.as_millis() as f64;
        let max_ms = self.max_interval.as_millis().max(self.interval.as_millis()) as f64;

        let exponent = failures.saturating_sub(1).min(i32::MAX as u32) as i32;
        let grown_ms = base_ms * self.multiplier.powi(exponent);
        let capped_ms = if grown_ms.is_finite() {
            grown_ms.min(max_ms)
        } else {
            max_ms
        };
        let capped_ms = capped_ms as u64;

        // Jitter only ever lengthens the delay so the interval stays a floor.
        let jitter_range = capped_ms / 10;
        let jitter = if self.jitter && jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(capped_ms + jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval_ms),
            max_attempts: config.max_attempts,
            multiplier: config.multiplier,
            max_interval: Duration::from_millis(config.max_interval_ms),
            jitter: config.jitter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fixed_two_seconds() {
        let policy = RetryPolicy::default();
        for failures in [1, 2, 10, 1000] {
            assert_eq!(policy.delay_for(failures), Duration::from_secs(2));
        }
        assert!(policy.allows(u32::MAX - 1));
    }

    #[test]
    fn test_backoff_calculation() {
        let policy = RetryPolicy {
            interval: Duration::from_millis(100),
            max_attempts: None,
            multiplier: 2.0,
            max_interval: Duration::from_millis(1000),
            jitter: false,
        };

        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(10), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_millis(1000));
    }

    #[test]
    fn test_jitter_never_shortens_delay() {
        let mut policy = RetryPolicy::fixed(Duration::from_millis(1000));
        policy.jitter = true;
        for _ in 0..50 {
            let delay = policy.delay_for(1);
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay < Duration::from_millis(1100));
        }
    }

    #[test]
    fn test_attempt_ceiling() {
        let policy = RetryPolicy::fixed(Duration::from_secs(2)).with_max_attempts(3);
        assert!(policy.allows(0));
        assert!(policy.allows(2));
        assert!(!policy.allows(3));
    }
}
