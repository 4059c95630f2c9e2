//! Output formatter trait

use mixalture_domain::{ConversationRecord, OrchestrationOutcome, OutputFormat};

/// Trait for rendering orchestration results and stored history
pub trait OutputFormatter {
    /// Only the final answer
    fn format_answer(&self, outcome: &OrchestrationOutcome) -> String;

    /// Answer with the question, contributors and per-stage call log
    fn format_full(&self, question: &str, outcome: &OrchestrationOutcome) -> String;

    /// Machine-readable output
    fn format_json(&self, question: &str, outcome: &OrchestrationOutcome) -> String;

    /// A list of stored conversations
    fn format_history(&self, records: &[ConversationRecord]) -> String;

    /// Dispatch on the configured [`OutputFormat`]
    fn format(&self, format: OutputFormat, question: &str, outcome: &OrchestrationOutcome) -> String {
        match format {
            OutputFormat::Answer => self.format_answer(outcome),
            OutputFormat::Full => self.format_full(question, outcome),
            OutputFormat::Json => self.format_json(question, outcome),
        }
    }
}
