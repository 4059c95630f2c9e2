//! Port for the structured conversation transcript.
//!
//! [`ConversationLogger`] records each provider request and result of an
//! orchestration in a machine-readable form (JSONL in the infrastructure
//! adapter). This is separate from `tracing`: tracing carries diagnostic
//! messages, the transcript carries the full exchange.

use serde_json::Value;

/// A structured transcript event.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "stage_request", "stage_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// `log` is synchronous and infallible; adapters swallow their own write
/// failures so an orchestration never fails because of its transcript.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
