//! Infrastructure layer for mixalture
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: provider HTTP clients, conversation storage,
//! the transcript logger, and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use logging::JsonlConversationLogger;
pub use providers::{GeminiClient, HuggingFaceClient};
pub use storage::{InMemoryConversationStore, JsonlConversationStore};
