//! Conversation history domain.
//!
//! - [`entities::ConversationRecord`] - one persisted prompt/answer pair
//! - [`entities::NewConversation`] - a record before the store assigns an id
//! - [`entities::UserName`] - the opaque identity a record belongs to

pub mod entities;
