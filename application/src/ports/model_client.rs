//! Model client port
//!
//! Defines the interface for calling a text-generation provider.

use async_trait::async_trait;
use mixalture_domain::{ModelResult, truncate};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during a provider call
///
/// The orchestrator never branches on the variant; these exist for logs and
/// for adapters to report what went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Misconfigured: {0}")]
    Misconfigured(String),
}

/// Client for one text-generation provider
///
/// Implementations (adapters) live in the infrastructure layer and only need
/// to provide [`try_generate`](ModelClient::try_generate). The provided
/// [`generate`](ModelClient::generate) converts every error into a failed
/// [`ModelResult`], so callers branch on a value instead of recovering from
/// an error.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Human-readable client name used in logs (e.g. `gemini-pro`)
    fn name(&self) -> &str;

    /// Send a prompt and return the generated text
    async fn try_generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Send a prompt, capturing any failure in the returned result.
    async fn generate(&self, prompt: &str) -> ModelResult {
        match self.try_generate(prompt).await {
            Ok(text) => {
                debug!(
                    client = self.name(),
                    bytes = text.len(),
                    preview = %truncate(&text, 80),
                    "Provider call succeeded"
                );
                ModelResult::success(text)
            }
            Err(e) => {
                warn!(client = self.name(), error = %e, "Provider call failed");
                ModelResult::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticClient(Result<String, ProviderError>);

    #[async_trait]
    impl ModelClient for StaticClient {
        fn name(&self) -> &str {
            "static"
        }

        async fn try_generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_generate_wraps_success() {
        let client = StaticClient(Ok("hello".to_string()));
        let result = client.generate("hi").await;
        assert_eq!(result, ModelResult::success("hello"));
    }

    #[tokio::test]
    async fn test_generate_captures_error() {
        let client = StaticClient(Err(ProviderError::RateLimited("slow down".to_string())));
        let result = client.generate("hi").await;
        assert!(!result.succeeded);
        assert!(result.text.is_empty());
        assert_eq!(result.error.as_deref(), Some("Rate limited: slow down"));
    }
}
