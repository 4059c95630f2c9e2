//! Hugging Face Inference adapter (secondary provider)
//!
//! Calls the text-generation task of the hosted Inference API. Prompts are
//! wrapped in the Mistral instruction format before sending.

use super::{http_client, missing_key, send};
use crate::config::FileSecondaryConfig;
use async_trait::async_trait;
use mixalture_application::{BehaviorConfig, ModelClient, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sampling parameters sent with every request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub repetition_penalty: f32,
    pub do_sample: bool,
    pub return_full_text: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from(&FileSecondaryConfig::default())
    }
}

impl From<&FileSecondaryConfig> for GenerationParams {
    fn from(config: &FileSecondaryConfig) -> Self {
        Self {
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
            repetition_penalty: config.repetition_penalty,
            do_sample: config.do_sample,
            return_full_text: false,
        }
    }
}

pub struct HuggingFaceClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    params: GenerationParams,
}

impl HuggingFaceClient {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        model: impl Into<String>,
        params: GenerationParams,
        behavior: &BehaviorConfig,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(behavior)?,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            params,
        })
    }

    /// Create from the `[providers.secondary]` section.
    pub fn from_config(
        config: &FileSecondaryConfig,
        behavior: &BehaviorConfig,
    ) -> Result<Self, ProviderError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| missing_key("Hugging Face", &config.api_key_env))?;
        Self::new(
            api_key,
            &config.base_url,
            &config.model,
            GenerationParams::from(config),
            behavior,
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl ModelClient for HuggingFaceClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn try_generate(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(
            provider = "huggingface",
            model = %self.model,
            max_new_tokens = self.params.max_new_tokens,
            temperature = self.params.temperature,
            "Invoking Hugging Face Inference"
        );

        let inputs = instruction_prompt(prompt);
        let request = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&TextGenerationRequest {
                inputs: &inputs,
                parameters: &self.params,
            });

        let body = send(request).await?;
        parse_response(&body)
    }
}

/// Wrap a prompt in the `[INST]` instruction format.
fn instruction_prompt(prompt: &str) -> String {
    format!("<s>[INST] {} [/INST]", prompt)
}

fn parse_response(body: &str) -> Result<String, ProviderError> {
    let response: TextGenerationResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::MalformedResponse(format!("Failed to parse Hugging Face response: {}", e))
    })?;

    let generated = match response {
        TextGenerationResponse::Batch(items) => items.into_iter().next(),
        TextGenerationResponse::Single(item) => Some(item),
    };

    match generated {
        Some(item) if !item.generated_text.trim().is_empty() => {
            Ok(item.generated_text.trim().to_string())
        }
        _ => Err(ProviderError::MalformedResponse(
            "Hugging Face response has no generated text".to_string(),
        )),
    }
}

#[derive(Debug, Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextGenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}
