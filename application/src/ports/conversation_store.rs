//! Conversation store port
//!
//! Persistence of completed conversations. The store owns record ids and
//! creation timestamps; records are append-only.

use async_trait::async_trait;
use mixalture_domain::{ConversationRecord, NewConversation, UserName};
use thiserror::Error;

/// Errors that can occur while reading or writing conversation history
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Append-only store of conversation records
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Persist a conversation, assigning its id and timestamp
    async fn save(&self, conversation: NewConversation) -> Result<ConversationRecord, StoreError>;

    /// All records for one user, oldest first
    async fn list_for_user(&self, user: &UserName) -> Result<Vec<ConversationRecord>, StoreError>;

    /// All records across users, oldest first
    async fn list_all(&self) -> Result<Vec<ConversationRecord>, StoreError>;
}
