//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where conversation history is kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Persist conversations at all
    pub enabled: bool,
    /// History file; defaults to the platform data directory
    pub path: Option<String>,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl FileStorageConfig {
    /// Resolve the history file path, expanding a leading `~/`.
    pub fn resolve_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(expand_home(path)),
            None => dirs::data_dir().map(|d| d.join("mixalture").join("conversations.jsonl")),
        }
    }
}

pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path() {
        let config = FileStorageConfig {
            enabled: true,
            path: Some("/tmp/history.jsonl".to_string()),
        };
        assert_eq!(
            config.resolve_path(),
            Some(PathBuf::from("/tmp/history.jsonl"))
        );
    }

    #[test]
    fn test_home_expansion() {
        let expanded = expand_home("~/mixalture/history.jsonl");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("mixalture/history.jsonl"));
    }
}
