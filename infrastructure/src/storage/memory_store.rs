//! In-memory conversation store, used when persistence is disabled.

use async_trait::async_trait;
use chrono::Utc;
use mixalture_application::{ConversationStore, StoreError};
use mixalture_domain::{ConversationRecord, NewConversation, RecordId, UserName};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryConversationStore {
    records: RwLock<Vec<ConversationRecord>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn save(&self, conversation: NewConversation) -> Result<ConversationRecord, StoreError> {
        let mut records = self.records.write().await;
        let id = RecordId(records.len() as u64 + 1);
        let record = ConversationRecord::new(id, conversation, Utc::now());
        records.push(record.clone());
        Ok(record)
    }

    async fn list_for_user(&self, user: &UserName) -> Result<Vec<ConversationRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| &r.user == user).cloned().collect())
    }

    async fn list_all(&self) -> Result<Vec<ConversationRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixalture_domain::Contributors;

    #[tokio::test]
    async fn test_sequential_ids_and_filtering() {
        let store = InMemoryConversationStore::new();
        for (user, prompt) in [("alice", "a"), ("bob", "b"), ("alice", "c")] {
            store
                .save(NewConversation {
                    user: UserName::try_new(user).unwrap(),
                    prompt: prompt.to_string(),
                    response: "r".to_string(),
                    contributors: Contributors::none(),
                    succeeded: false,
                })
                .await
                .unwrap();
        }

        let all = store.list_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let bob = UserName::try_new("bob").unwrap();
        assert_eq!(store.list_for_user(&bob).await.unwrap().len(), 1);
    }
}
