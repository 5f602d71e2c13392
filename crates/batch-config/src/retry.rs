use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `Enabled`/`MaxAttempts`/`BackoffBase`/`MaxBackoff` from spec.md §6.
/// `enabled = false` means the executor still generates and executes once,
/// but never retries a classified-retryable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    pub enabled: bool,
    pub max_attempts: usize,
    #[serde(with = "duration_millis")]
    pub backoff_base: Duration,
    #[serde(with = "duration_millis")]
    pub max_backoff: Duration,
}

impl RetryConfig {
    pub fn new(
        enabled: bool,
        max_attempts: usize,
        backoff_base: Duration,
        max_backoff: Duration,
    ) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        if max_backoff < backoff_base {
            return Err(ConfigError::MaxBackoffBelowBase {
                backoff_base,
                max_backoff,
            });
        }

        Ok(RetryConfig {
            enabled,
            max_attempts,
            backoff_base,
            max_backoff,
        })
    }

    /// An effective `max_attempts` of 1 disables retrying without needing a
    /// separate code path in the executor.
    pub fn effective_max_attempts(&self) -> usize {
        if self.enabled { self.max_attempts } else { 1 }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            enabled: true,
            max_attempts: 3,
            backoff_base: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_max_backoff_below_base() {
        let err = RetryConfig::new(
            true,
            3,
            Duration::from_millis(500),
            Duration::from_millis(100),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MaxBackoffBelowBase { .. }));
    }

    #[test]
    fn rejects_zero_max_attempts() {
        let err = RetryConfig::new(true, 0, Duration::from_millis(1), Duration::from_millis(1))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroMaxAttempts));
    }

    #[test]
    fn disabled_retry_reports_single_attempt() {
        let cfg = RetryConfig {
            enabled: false,
            ..RetryConfig::default()
        };
        assert_eq!(cfg.effective_max_attempts(), 1);
    }
}
