//! Orchestration value objects - immutable result types.
//!
//! - [`ModelResult`] - one provider call's result
//! - [`StageStep`] - metadata about one provider call (no text)
//! - [`OrchestrationOutcome`] - the final answer returned to the caller

use super::entities::{Resolution, Stage};
use crate::core::provider::{Contributors, ProviderId};
use serde::Serialize;

/// Message shown to the user when neither provider produced an answer.
pub const SAFE_FALLBACK_MESSAGE: &str = "An error occurred while generating the response.";

/// Result of a single provider call
///
/// Produced by each provider call and consumed by the orchestrator; never
/// persisted. `error` carries the failure detail for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResult {
    pub text: String,
    pub succeeded: bool,
    pub error: Option<String>,
}

impl ModelResult {
    /// Creates a successful result.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: true,
            error: None,
        }
    }

    /// Creates a failed result. The detail never reaches the end user.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            succeeded: false,
            error: Some(error.into()),
        }
    }

    /// The text if the call succeeded
    pub fn into_text(self) -> Option<String> {
        self.succeeded.then_some(self.text)
    }
}

/// Record of one provider call made during an orchestration
///
/// The direct fallback after a failed draft is recorded under
/// [`Stage::Drafting`] with the secondary provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageStep {
    pub stage: Stage,
    pub provider: ProviderId,
    pub succeeded: bool,
}

impl StageStep {
    pub fn new(stage: Stage, provider: ProviderId, succeeded: bool) -> Self {
        Self {
            stage,
            provider,
            succeeded,
        }
    }
}

/// Final answer of an orchestration
///
/// Invariant: when `succeeded` is false, `contributors` is empty and `text`
/// is [`SAFE_FALLBACK_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrchestrationOutcome {
    text: String,
    succeeded: bool,
    contributors: Contributors,
    resolution: Resolution,
    steps: Vec<StageStep>,
}

impl OrchestrationOutcome {
    /// Build an outcome from the path the orchestration took.
    ///
    /// For [`Resolution::Exhausted`] the given text is discarded in favor of
    /// the safe fallback message.
    pub fn resolve(resolution: Resolution, text: impl Into<String>, steps: Vec<StageStep>) -> Self {
        let text = if resolution.is_success() {
            text.into()
        } else {
            SAFE_FALLBACK_MESSAGE.to_string()
        };
        Self {
            text,
            succeeded: resolution.is_success(),
            contributors: resolution.contributors(),
            resolution,
            steps,
        }
    }

    /// Outcome for a run where no provider produced an answer
    pub fn exhausted(steps: Vec<StageStep>) -> Self {
        Self::resolve(Resolution::Exhausted, "", steps)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn contributors(&self) -> &Contributors {
        &self.contributors
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn steps(&self) -> &[StageStep] {
        &self.steps
    }

    /// Number of provider calls made
    pub fn call_count(&self) -> usize {
        self.steps.len()
    }

    /// A successful answer that used fewer than both providers
    pub fn is_partial(&self) -> bool {
        self.succeeded && self.contributors.len() < 2
    }
}
