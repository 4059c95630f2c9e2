//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod behavior;
mod logging;
mod output;
mod providers;
mod repl;
mod storage;

pub use behavior::FileBehaviorConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use providers::{FilePrimaryConfig, FileProvidersConfig, FileSecondaryConfig};
pub use repl::FileReplConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot work at all.
    Error,
    /// The configuration works but may not behave as expected.
    Warning,
}

/// A problem detected in the loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `providers.secondary.temperature`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider endpoints, models and credentials
    pub providers: FileProvidersConfig,
    /// Provider call behavior
    pub behavior: FileBehaviorConfig,
    /// Conversation history storage
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Diagnostic and transcript logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let primary = &self.providers.primary;
        let secondary = &self.providers.secondary;

        for (field, value) in [
            ("providers.primary.model", &primary.model),
            ("providers.primary.base_url", &primary.base_url),
            ("providers.secondary.model", &secondary.model),
            ("providers.secondary.base_url", &secondary.base_url),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(field, "must not be empty"));
            }
        }

        if secondary.max_new_tokens == 0 {
            issues.push(ConfigIssue::error(
                "providers.secondary.max_new_tokens",
                "must be greater than 0",
            ));
        }
        if !(0.0..=2.0).contains(&secondary.temperature) {
            issues.push(ConfigIssue::warning(
                "providers.secondary.temperature",
                format!("{} is outside 0.0..=2.0", secondary.temperature),
            ));
        }
        if secondary.repetition_penalty < 1.0 {
            issues.push(ConfigIssue::warning(
                "providers.secondary.repetition_penalty",
                format!("{} is below 1.0", secondary.repetition_penalty),
            ));
        }

        if self.storage.enabled && self.storage.resolve_path().is_none() {
            issues.push(ConfigIssue::warning(
                "storage.path",
                "no data directory found; conversations will not be saved",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixalture_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers.primary]
model = "gemini-1.5-flash"
api_key_env = "MY_GEMINI_KEY"

[providers.secondary]
model = "HuggingFaceH4/zephyr-7b-beta"
temperature = 0.3

[behavior]
timeout_seconds = 15

[storage]
path = "/var/lib/mixalture/history.jsonl"

[output]
format = "full"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/mixalture/history.txt"

[logging]
conversation_log = "transcript.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.primary.model, "gemini-1.5-flash");
        assert_eq!(config.providers.primary.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.providers.secondary.model, "HuggingFaceH4/zephyr-7b-beta");
        assert_eq!(config.providers.secondary.temperature, 0.3);
        assert_eq!(config.behavior.timeout_seconds, Some(15));
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("transcript.jsonl")
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[providers.secondary]
max_new_tokens = 256
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.secondary.max_new_tokens, 256);
        // Defaults should apply
        assert_eq!(config.providers.secondary.repetition_penalty, 1.1);
        assert_eq!(config.providers.primary.model, "gemini-pro");
        assert!(config.storage.enabled);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate_default_config() {
        let config = FileConfig {
            storage: FileStorageConfig {
                enabled: true,
                path: Some("history.jsonl".to_string()),
            },
            ..Default::default()
        };
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_each_problem() {
        let mut config = FileConfig::default();
        config.storage.enabled = false;
        config.providers.primary.model = " ".to_string();
        config.providers.secondary.max_new_tokens = 0;
        config.providers.secondary.temperature = 3.5;

        let issues = config.validate();
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "providers.primary.model",
                "providers.secondary.max_new_tokens",
                "providers.secondary.temperature",
            ]
        );
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[2].severity, Severity::Warning);
    }
}
