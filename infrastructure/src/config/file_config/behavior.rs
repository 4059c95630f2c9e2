//! Behavior configuration from TOML (`[behavior]` section)

use mixalture_application::BehaviorConfig;
use mixalture_application::config::DEFAULT_TIMEOUT_SECONDS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Timeout in seconds for each provider call (0 disables it)
    pub timeout_seconds: Option<u64>,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl FileBehaviorConfig {
    pub fn to_behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(self.timeout_seconds)
    }
}
