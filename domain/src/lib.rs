//! Domain layer for mixalture
//!
//! This crate contains the core value objects and entities. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Orchestration
//!
//! A single prompt is answered by two providers working in sequence:
//!
//! - **Draft**: the primary provider writes a detailed first answer
//! - **Critique**: the secondary provider enhances and corrects the draft
//! - **Synthesis**: the primary provider merges both into the final answer
//!
//! Every stage has a fallback, so the caller always gets the best answer
//! computed so far (see [`Resolution`]).
//!
//! ## Conversation
//!
//! Each completed orchestration becomes one [`ConversationRecord`] owned by
//! the persistence adapter.

pub mod config;
pub mod conversation;
pub mod core;
pub mod orchestration;
pub mod prompt;

// Re-export commonly used types
pub use config::OutputFormat;
pub use conversation::entities::{ConversationRecord, NewConversation, RecordId, UserName};
pub use core::{
    error::DomainError,
    prompt::PromptRequest,
    provider::{Contributors, ProviderId},
    string::truncate,
};
pub use orchestration::{
    entities::{Resolution, Stage},
    value_objects::{ModelResult, OrchestrationOutcome, SAFE_FALLBACK_MESSAGE, StageStep},
};
pub use prompt::PromptTemplate;
