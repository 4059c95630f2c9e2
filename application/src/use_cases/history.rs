//! Conversation history use case

use crate::ports::conversation_store::{ConversationStore, StoreError};
use mixalture_domain::{ConversationRecord, UserName};
use std::sync::Arc;
use tracing::debug;

/// Which records to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryQuery {
    AllUsers,
    User(UserName),
}

/// Use case for reading past conversations
pub struct ConversationHistoryUseCase {
    store: Arc<dyn ConversationStore>,
}

impl ConversationHistoryUseCase {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// List matching records, oldest first.
    ///
    /// With a `limit`, only the most recent `limit` records are returned
    /// (still in chronological order).
    pub async fn execute(
        &self,
        query: &HistoryQuery,
        limit: Option<usize>,
    ) -> Result<Vec<ConversationRecord>, StoreError> {
        let mut records = match query {
            HistoryQuery::AllUsers => self.store.list_all().await?,
            HistoryQuery::User(user) => self.store.list_for_user(user).await?,
        };
        debug!(count = records.len(), ?query, "Loaded conversation history");

        if let Some(limit) = limit
            && records.len() > limit
        {
            records.drain(..records.len() - limit);
        }
        Ok(records)
    }
}
