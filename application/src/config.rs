//! Application-level configuration.
//!
//! Configuration types that control how provider clients behave, such as
//! request timeouts.

use std::time::Duration;

/// Default time to wait for a provider before giving up.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Application behavior configuration.
///
/// The orchestrator itself has no timeout or retry logic; the timeout here is
/// handed to the provider clients when they are built.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a provider response before timing out.
    pub timeout: Option<Duration>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self::with_timeout_seconds(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None` or zero, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = BehaviorConfig::default();
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_zero_disables_timeout() {
        assert_eq!(BehaviorConfig::from_timeout_seconds(Some(0)).timeout, None);
        assert_eq!(BehaviorConfig::from_timeout_seconds(None).timeout, None);
        assert_eq!(
            BehaviorConfig::from_timeout_seconds(Some(5)).timeout,
            Some(Duration::from_secs(5))
        );
    }
}
