//! Text-generation provider adapters
//!
//! Each adapter implements the [`ModelClient`](mixalture_application::ModelClient)
//! port over a provider's HTTP API. Request building and response parsing are
//! plain functions so they can be tested without a network.

pub mod gemini;
pub mod huggingface;

use mixalture_application::{BehaviorConfig, ProviderError};
use reqwest::StatusCode;

pub use gemini::GeminiClient;
pub use huggingface::HuggingFaceClient;

const USER_AGENT: &str = concat!("mixalture/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body kept in a [`ProviderError`].
const MAX_ERROR_BODY: usize = 300;

/// Build the HTTP client shared by one adapter.
pub(crate) fn http_client(behavior: &BehaviorConfig) -> Result<reqwest::Client, ProviderError> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = behavior.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ProviderError::Misconfigured(format!("Failed to build HTTP client: {}", e)))
}

/// Map a transport-level failure.
///
/// The URL is stripped from the message so request URLs never reach logs or
/// transcripts.
pub(crate) fn send_error(e: reqwest::Error) -> ProviderError {
    let e = e.without_url();
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_connect() {
        ProviderError::ConnectionError(e.to_string())
    } else {
        ProviderError::RequestFailed(e.to_string())
    }
}

/// Map a non-success HTTP status and its body.
pub(crate) fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let detail = format!(
        "HTTP {} {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown"),
        mixalture_domain::truncate(body.trim(), MAX_ERROR_BODY)
    );
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication(detail),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderError::Timeout,
        _ => ProviderError::RequestFailed(detail),
    }
}

/// Send a prepared request and return the body of a successful response.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<String, ProviderError> {
    let response = request.send().await.map_err(send_error)?;
    let status = response.status();
    let body = response.text().await.map_err(send_error)?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(body)
}

pub(crate) fn missing_key(provider: &str, env_var: &str) -> ProviderError {
    ProviderError::Misconfigured(format!(
        "{} API key not found. Set the {} environment variable or api_key in the config file.",
        provider, env_var
    ))
}
