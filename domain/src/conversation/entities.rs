//! Conversation entities

use crate::core::error::DomainError;
use crate::core::prompt::PromptRequest;
use crate::core::provider::Contributors;
use crate::orchestration::value_objects::OrchestrationOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the user a conversation belongs to (Value Object)
///
/// Authentication happens outside this system; the name is taken as given,
/// trimmed, and must not be blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn try_new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUserName(
                "user name must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

/// Identifier assigned by the conversation store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A completed orchestration waiting to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversation {
    pub user: UserName,
    pub prompt: String,
    pub response: String,
    pub contributors: Contributors,
    pub succeeded: bool,
}

impl NewConversation {
    /// Capture the outcome of one orchestration for `user`
    pub fn from_outcome(
        user: UserName,
        prompt: &PromptRequest,
        outcome: &OrchestrationOutcome,
    ) -> Self {
        Self {
            user,
            prompt: prompt.content().to_string(),
            response: outcome.text().to_string(),
            contributors: outcome.contributors().clone(),
            succeeded: outcome.succeeded(),
        }
    }
}

/// A persisted conversation entry (Entity)
///
/// Created once per completed orchestration; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: RecordId,
    pub user: UserName,
    pub prompt: String,
    pub response: String,
    pub contributors: Contributors,
    pub succeeded: bool,
    pub created_at: DateTime<Utc>,
}

impl ConversationRecord {
    pub fn new(id: RecordId, conversation: NewConversation, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user: conversation.user,
            prompt: conversation.prompt,
            response: conversation.response,
            contributors: conversation.contributors,
            succeeded: conversation.succeeded,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::entities::Resolution;
    use crate::ProviderId;

    #[test]
    fn test_user_name_trims() {
        let name = UserName::try_new("  alice ").unwrap();
        assert_eq!(name.as_str(), "alice");
        assert!(UserName::try_new("   ").is_err());
    }

    #[test]
    fn test_new_conversation_from_outcome() {
        let prompt = PromptRequest::try_new("What is Rust?").unwrap();
        let outcome = OrchestrationOutcome::resolve(Resolution::DirectFallback, "An answer", vec![]);
        let conv = NewConversation::from_outcome(UserName::try_new("bob").unwrap(), &prompt, &outcome);

        assert_eq!(conv.prompt, "What is Rust?");
        assert_eq!(conv.response, "An answer");
        assert!(conv.succeeded);
        assert!(conv.contributors.contains(ProviderId::Secondary));
    }

    #[test]
    fn test_record_json_shape() {
        let prompt = PromptRequest::try_new("hi").unwrap();
        let outcome = OrchestrationOutcome::resolve(Resolution::Synthesized, "hello", vec![]);
        let conv = NewConversation::from_outcome(UserName::try_new("carol").unwrap(), &prompt, &outcome);
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = ConversationRecord::new(RecordId(7), conv, created_at);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["user"], "carol");
        assert_eq!(json["contributors"], serde_json::json!(["primary", "secondary"]));

        let back: ConversationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
