//! Chat turn use case
//!
//! One user message in the chat: orchestrate an answer, then persist it.

use crate::ports::conversation_store::{ConversationStore, StoreError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::orchestrate::{OrchestrateError, ResponseOrchestrator};
use mixalture_domain::{
    ConversationRecord, NewConversation, OrchestrationOutcome, PromptRequest, UserName,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during a chat turn
#[derive(Error, Debug)]
pub enum ChatError {
    #[error(transparent)]
    InvalidInput(#[from] OrchestrateError),

    /// The answer was produced but could not be saved.
    #[error("Failed to save conversation: {source}")]
    Store {
        outcome: Box<OrchestrationOutcome>,
        #[source]
        source: StoreError,
    },
}

impl ChatError {
    /// The answer computed before the failure, if any
    pub fn outcome(&self) -> Option<&OrchestrationOutcome> {
        match self {
            ChatError::InvalidInput(_) => None,
            ChatError::Store { outcome, .. } => Some(outcome),
        }
    }
}

/// Input for the [`ChatTurnUseCase`].
#[derive(Debug, Clone)]
pub struct ChatTurnInput {
    pub user: UserName,
    pub prompt: String,
}

impl ChatTurnInput {
    pub fn new(user: UserName, prompt: impl Into<String>) -> Self {
        Self {
            user,
            prompt: prompt.into(),
        }
    }
}

/// Result of a chat turn
#[derive(Debug, Clone)]
pub struct ChatTurnOutput {
    pub outcome: OrchestrationOutcome,
    /// The persisted record, `None` when no store is configured
    pub record: Option<ConversationRecord>,
}

/// Use case for answering and recording one chat message
pub struct ChatTurnUseCase {
    orchestrator: ResponseOrchestrator,
    store: Option<Arc<dyn ConversationStore>>,
}

impl ChatTurnUseCase {
    pub fn new(orchestrator: ResponseOrchestrator) -> Self {
        Self {
            orchestrator,
            store: None,
        }
    }

    /// Persist every completed turn to `store`.
    pub fn with_store(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn execute(&self, input: ChatTurnInput) -> Result<ChatTurnOutput, ChatError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: ChatTurnInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ChatTurnOutput, ChatError> {
        let prompt = PromptRequest::try_new(input.prompt).map_err(OrchestrateError::from)?;
        let outcome = self
            .orchestrator
            .execute_with_progress(&prompt, progress)
            .await;

        let Some(store) = &self.store else {
            return Ok(ChatTurnOutput {
                outcome,
                record: None,
            });
        };

        let conversation = NewConversation::from_outcome(input.user, &prompt, &outcome);
        match store.save(conversation).await {
            Ok(record) => {
                info!(id = %record.id, user = %record.user, "Conversation saved");
                Ok(ChatTurnOutput {
                    outcome,
                    record: Some(record),
                })
            }
            Err(e) => {
                warn!("Could not save conversation: {}", e);
                Err(ChatError::Store {
                    outcome: Box::new(outcome),
                    source: e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_client::{ModelClient, ProviderError};
    use async_trait::async_trait;
    use chrono::Utc;
    use mixalture_domain::{Contributors, ProviderId, RecordId};
    use std::sync::Mutex;

    /// Echoes a fixed answer, or always fails
    struct FixedClient(Option<&'static str>);

    #[async_trait]
    impl ModelClient for FixedClient {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn try_generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            self.0
                .map(str::to_string)
                .ok_or(ProviderError::Timeout)
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<Vec<ConversationRecord>>,
    }

    #[async_trait]
    impl ConversationStore for MemoryStore {
        async fn save(&self, conversation: NewConversation) -> Result<ConversationRecord, StoreError> {
            let mut records = self.records.lock().unwrap();
            let record = ConversationRecord::new(
                RecordId(records.len() as u64 + 1),
                conversation,
                Utc::now(),
            );
            records.push(record.clone());
            Ok(record)
        }

        async fn list_for_user(&self, user: &UserName) -> Result<Vec<ConversationRecord>, StoreError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.user == user)
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> Result<Vec<ConversationRecord>, StoreError> {
            Ok(self.records.lock().unwrap().clone())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl ConversationStore for BrokenStore {
        async fn save(&self, _conversation: NewConversation) -> Result<ConversationRecord, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        async fn list_for_user(&self, _user: &UserName) -> Result<Vec<ConversationRecord>, StoreError> {
            Ok(vec![])
        }

        async fn list_all(&self) -> Result<Vec<ConversationRecord>, StoreError> {
            Ok(vec![])
        }
    }

    fn orchestrator(primary: Option<&'static str>, secondary: Option<&'static str>) -> ResponseOrchestrator {
        ResponseOrchestrator::new(
            Arc::new(FixedClient(primary)),
            Arc::new(FixedClient(secondary)),
        )
    }

    fn alice() -> UserName {
        UserName::try_new("alice").unwrap()
    }

    #[tokio::test]
    async fn test_turn_is_persisted() {
        let store = Arc::new(MemoryStore::default());
        let use_case = ChatTurnUseCase::new(orchestrator(Some("answer"), Some("better")))
            .with_store(store.clone());

        let output = use_case
            .execute(ChatTurnInput::new(alice(), "What is Rust?"))
            .await
            .unwrap();

        let record = output.record.unwrap();
        assert_eq!(record.prompt, "What is Rust?");
        assert_eq!(record.response, output.outcome.text());
        assert_eq!(record.contributors, Contributors::both());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_outcome_is_still_recorded() {
        let store = Arc::new(MemoryStore::default());
        let use_case = ChatTurnUseCase::new(orchestrator(None, None)).with_store(store.clone());

        let output = use_case
            .execute(ChatTurnInput::new(alice(), "hello"))
            .await
            .unwrap();

        let record = output.record.unwrap();
        assert!(!record.succeeded);
        assert!(record.contributors.is_empty());
    }

    #[tokio::test]
    async fn test_without_store_returns_outcome_only() {
        let use_case = ChatTurnUseCase::new(orchestrator(None, Some("direct")));
        let output = use_case
            .execute(ChatTurnInput::new(alice(), "hello"))
            .await
            .unwrap();

        assert!(output.record.is_none());
        assert_eq!(output.outcome.contributors(), &Contributors::only(ProviderId::Secondary));
    }

    #[tokio::test]
    async fn test_blank_prompt_is_not_persisted() {
        let store = Arc::new(MemoryStore::default());
        let use_case = ChatTurnUseCase::new(orchestrator(Some("a"), Some("b"))).with_store(store.clone());

        let err = use_case
            .execute(ChatTurnInput::new(alice(), "   "))
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::InvalidInput(_)));
        assert!(err.outcome().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_keeps_outcome() {
        let use_case =
            ChatTurnUseCase::new(orchestrator(Some("draft"), None)).with_store(Arc::new(BrokenStore));

        let err = use_case
            .execute(ChatTurnInput::new(alice(), "hello"))
            .await
            .unwrap_err();

        let outcome = err.outcome().unwrap();
        assert_eq!(outcome.text(), "draft");
        assert!(err.to_string().contains("disk full"));
    }
}
