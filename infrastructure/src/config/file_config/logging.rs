//! Logging configuration from TOML (`[logging]` section)

use super::storage::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of every provider exchange
    pub conversation_log: Option<String>,
    /// Directory for daily rolling diagnostic log files
    pub dir: Option<String>,
}

impl FileLoggingConfig {
    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        self.conversation_log.as_deref().map(expand_home)
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.dir.as_deref().map(expand_home)
    }
}
