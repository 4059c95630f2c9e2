//! Conversation history storage.
//!
//! Adapters for the [`ConversationStore`](mixalture_application::ConversationStore)
//! port: an append-only JSONL file and an in-memory store.

mod jsonl_store;
mod memory_store;

pub use jsonl_store::JsonlConversationStore;
pub use memory_store::InMemoryConversationStore;
