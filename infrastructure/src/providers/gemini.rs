//! Google Gemini adapter (primary provider)
//!
//! Calls the Generative Language `generateContent` endpoint with a single
//! user turn and concatenates the text parts of the first candidate.

use super::{http_client, missing_key, send};
use crate::config::FilePrimaryConfig;
use async_trait::async_trait;
use mixalture_application::{BehaviorConfig, ModelClient, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        model: impl Into<String>,
        behavior: &BehaviorConfig,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(behavior)?,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        })
    }

    /// Create from the `[providers.primary]` section.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Misconfigured` when no API key is available.
    pub fn from_config(
        config: &FilePrimaryConfig,
        behavior: &BehaviorConfig,
    ) -> Result<Self, ProviderError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| missing_key("Gemini", &config.api_key_env))?;
        Self::new(api_key, &config.base_url, &config.model, behavior)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// The key travels in a header, never in the URL.
    fn request(&self, prompt: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::new(prompt))
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn try_generate(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(
            provider = "gemini",
            model = %self.model,
            prompt_bytes = prompt.len(),
            "Invoking Gemini"
        );

        let body = send(self.request(prompt)).await?;
        parse_response(&body)
    }
}

/// Extract the answer text from a `generateContent` response body.
fn parse_response(body: &str) -> Result<String, ProviderError> {
    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::MalformedResponse(format!("Failed to parse Gemini response: {}", e))
    })?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(ProviderError::MalformedResponse(format!(
            "Gemini returned no answer ({})",
            reason
        )));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty content".to_string());
        return Err(ProviderError::MalformedResponse(format!(
            "Gemini response has no text ({})",
            reason
        )));
    }
    Ok(text)
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
