//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Primary provider (Google Gemini) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePrimaryConfig {
    /// Environment variable holding the API key (default: "GOOGLE_API_KEY").
    pub api_key_env: String,
    /// Direct API key. Prefer the environment variable.
    pub api_key: Option<String>,
    /// Base URL of the Generative Language API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
}

impl Default for FilePrimaryConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-pro".to_string(),
        }
    }
}

impl FilePrimaryConfig {
    /// The configured key, falling back to `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

/// Secondary provider (Hugging Face Inference) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSecondaryConfig {
    /// Environment variable holding the API token (default: "HUGGINGFACE_API_KEY").
    pub api_key_env: String,
    /// Direct API token. Prefer the environment variable.
    pub api_key: Option<String>,
    /// Base URL of the Inference API.
    pub base_url: String,
    /// Model repository id.
    pub model: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub repetition_penalty: f32,
    pub do_sample: bool,
}

impl Default for FileSecondaryConfig {
    fn default() -> Self {
        Self {
            api_key_env: "HUGGINGFACE_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api-inference.huggingface.co".to_string(),
            model: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            max_new_tokens: 512,
            temperature: 0.7,
            repetition_penalty: 1.1,
            do_sample: true,
        }
    }
}

impl FileSecondaryConfig {
    /// The configured token, falling back to `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Drafts and synthesizes answers.
    pub primary: FilePrimaryConfig,
    /// Critiques drafts and answers directly when drafting fails.
    pub secondary: FileSecondaryConfig,
}

fn resolve_key(direct: Option<&str>, env_var: &str) -> Option<String> {
    direct
        .filter(|k| !k.trim().is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|k| !k.trim().is_empty())
}
