//! Logging infrastructure: the JSONL conversation transcript.
//!
//! Provides [`JsonlConversationLogger`], which implements the
//! [`ConversationLogger`](mixalture_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
