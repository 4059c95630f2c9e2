//! Application layer for mixalture
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    conversation_store::{ConversationStore, StoreError},
    model_client::{ModelClient, ProviderError},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::chat_turn::{ChatError, ChatTurnInput, ChatTurnOutput, ChatTurnUseCase};
pub use use_cases::history::{ConversationHistoryUseCase, HistoryQuery};
pub use use_cases::orchestrate::{OrchestrateError, ProviderUnavailable, ResponseOrchestrator};
