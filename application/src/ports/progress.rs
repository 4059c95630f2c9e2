//! Progress notification port
//!
//! Defines the interface for reporting progress during an orchestration.

use mixalture_domain::{OrchestrationOutcome, ProviderId, Stage};

/// Callback for progress updates during an orchestration
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called before a provider call is made
    fn on_stage_start(&self, stage: Stage, provider: ProviderId);

    /// Called when a provider call returns
    fn on_stage_complete(&self, stage: Stage, provider: ProviderId, success: bool);

    /// Called once the orchestration reaches its final answer
    fn on_finished(&self, _outcome: &OrchestrationOutcome) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage, _provider: ProviderId) {}
    fn on_stage_complete(&self, _stage: Stage, _provider: ProviderId, _success: bool) {}
}
