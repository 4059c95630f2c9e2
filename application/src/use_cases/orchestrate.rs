//! Orchestrate use case
//!
//! Answers one prompt by chaining two providers:
//!
//! 1. **Draft** (primary) - on failure, ask the secondary provider directly
//! 2. **Critique** (secondary) - on failure, answer with the draft
//! 3. **Synthesis** (primary) - on failure, answer with the draft
//!
//! Provider failures never escape this module; they only move the run down
//! the fallback ladder. The only error reported to the caller is a blank
//! prompt, which is rejected before any provider is called.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::model_client::ModelClient;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use mixalture_domain::{
    DomainError, OrchestrationOutcome, PromptRequest, PromptTemplate, ProviderId, Resolution,
    Stage, StageStep, truncate,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors reported by the orchestrator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestrateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Any other domain rule violation, kept as is
    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for OrchestrateError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(msg) => OrchestrateError::InvalidInput(msg),
            other => OrchestrateError::Domain(other),
        }
    }
}

/// A failed provider call, as seen by the orchestrator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider} provider unavailable during {stage}: {cause}")]
pub struct ProviderUnavailable {
    pub provider: ProviderId,
    pub stage: Stage,
    pub cause: String,
}

/// Use case for answering a prompt with both providers
pub struct ResponseOrchestrator {
    primary: Arc<dyn ModelClient>,
    secondary: Arc<dyn ModelClient>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for ResponseOrchestrator {
    fn clone(&self) -> Self {
        Self {
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl ResponseOrchestrator {
    pub fn new(primary: Arc<dyn ModelClient>, secondary: Arc<dyn ModelClient>) -> Self {
        Self {
            primary,
            secondary,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation transcript logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Validate the raw prompt and run the orchestration
    pub async fn orchestrate(&self, prompt: &str) -> Result<OrchestrationOutcome, OrchestrateError> {
        let prompt = PromptRequest::try_new(prompt)?;
        Ok(self.execute(&prompt).await)
    }

    /// Run the orchestration with default (no-op) progress
    pub async fn execute(&self, prompt: &PromptRequest) -> OrchestrationOutcome {
        self.execute_with_progress(prompt, &NoProgress).await
    }

    /// Run the orchestration with progress callbacks
    pub async fn execute_with_progress(
        &self,
        prompt: &PromptRequest,
        progress: &dyn ProgressNotifier,
    ) -> OrchestrationOutcome {
        let question = prompt.content();
        info!(
            primary = self.primary.name(),
            secondary = self.secondary.name(),
            "Starting orchestration: {}",
            truncate(question, 100)
        );

        let mut steps = Vec::with_capacity(3);
        let outcome = self
            .run_stages(question, &mut steps, progress)
            .await;

        info!(
            resolution = %outcome.resolution(),
            contributors = %outcome.contributors().joined(),
            calls = outcome.call_count(),
            "Orchestration finished"
        );
        self.conversation_logger.log(ConversationEvent::new(
            "orchestration_complete",
            serde_json::json!({
                "resolution": outcome.resolution().as_str(),
                "succeeded": outcome.succeeded(),
                "contributors": outcome.contributors(),
                "calls": outcome.call_count(),
            }),
        ));
        progress.on_finished(&outcome);
        outcome
    }

    async fn run_stages(
        &self,
        question: &str,
        steps: &mut Vec<StageStep>,
        progress: &dyn ProgressNotifier,
    ) -> OrchestrationOutcome {
        // Stage 1: Draft
        let draft_prompt = PromptTemplate::draft(question);
        let Some(draft) = self
            .call(Stage::Drafting, ProviderId::Primary, &draft_prompt, steps, progress)
            .await
        else {
            return self.direct_fallback(question, steps, progress).await;
        };

        // Stage 2: Critique
        let critique_prompt = PromptTemplate::critique(question, &draft);
        let Some(critique) = self
            .call(Stage::Critiquing, ProviderId::Secondary, &critique_prompt, steps, progress)
            .await
        else {
            return OrchestrationOutcome::resolve(
                Resolution::CritiqueUnavailable,
                draft,
                std::mem::take(steps),
            );
        };

        // Stage 3: Synthesis
        let synthesis_prompt = PromptTemplate::synthesis(question, &draft, &critique);
        match self
            .call(Stage::Synthesizing, ProviderId::Primary, &synthesis_prompt, steps, progress)
            .await
        {
            Some(synthesis) => OrchestrationOutcome::resolve(
                Resolution::Synthesized,
                synthesis,
                std::mem::take(steps),
            ),
            None => OrchestrationOutcome::resolve(
                Resolution::SynthesisUnavailable,
                draft,
                std::mem::take(steps),
            ),
        }
    }

    /// Drafting failed: the secondary provider answers the raw question
    async fn direct_fallback(
        &self,
        question: &str,
        steps: &mut Vec<StageStep>,
        progress: &dyn ProgressNotifier,
    ) -> OrchestrationOutcome {
        debug!("Draft unavailable, asking secondary provider directly");
        match self
            .call(Stage::Drafting, ProviderId::Secondary, question, steps, progress)
            .await
        {
            Some(answer) => OrchestrationOutcome::resolve(
                Resolution::DirectFallback,
                answer,
                std::mem::take(steps),
            ),
            None => {
                warn!("Both providers failed; returning fallback message");
                OrchestrationOutcome::exhausted(std::mem::take(steps))
            }
        }
    }

    /// Make one provider call, recording it as a step
    async fn call(
        &self,
        stage: Stage,
        provider: ProviderId,
        prompt: &str,
        steps: &mut Vec<StageStep>,
        progress: &dyn ProgressNotifier,
    ) -> Option<String> {
        let client = self.client(provider);
        progress.on_stage_start(stage, provider);
        self.conversation_logger.log(ConversationEvent::new(
            "stage_request",
            serde_json::json!({
                "stage": stage.as_str(),
                "provider": provider.as_str(),
                "client": client.name(),
                "prompt": prompt,
            }),
        ));

        let result = client.generate(prompt).await;

        steps.push(StageStep::new(stage, provider, result.succeeded));
        progress.on_stage_complete(stage, provider, result.succeeded);
        self.conversation_logger.log(ConversationEvent::new(
            "stage_result",
            serde_json::json!({
                "stage": stage.as_str(),
                "provider": provider.as_str(),
                "succeeded": result.succeeded,
                "text": result.text,
                "error": result.error,
            }),
        ));

        if result.succeeded {
            debug!(
                from = %stage,
                to = %stage.advance(true),
                provider = %provider,
                "Stage succeeded"
            );
        } else {
            let unavailable = ProviderUnavailable {
                provider,
                stage,
                cause: result.error.clone().unwrap_or_default(),
            };
            warn!(from = %stage, to = %stage.advance(false), "{}", unavailable);
        }

        result.into_text()
    }

    fn client(&self, provider: ProviderId) -> &dyn ModelClient {
        match provider {
            ProviderId::Primary => self.primary.as_ref(),
            ProviderId::Secondary => self.secondary.as_ref(),
        }
    }
}
