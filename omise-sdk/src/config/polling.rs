use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often and how long to poll a token's charge status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Total fetches, the first one included. At least 1.
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollingConfig {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PollingConfig::default();
        assert_eq!(config.max_attempts(), 10);
        assert_eq!(config.interval, Duration::from_secs(3));
    }

    #[test]
    fn test_zero_attempts_is_clamped() {
        assert_eq!(PollingConfig::new(0, Duration::ZERO).max_attempts(), 1);
        let config = PollingConfig {
            max_attempts: 0,
            interval: Duration::ZERO,
        };
        assert_eq!(config.max_attempts(), 1);
    }
}
