//! Prompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user prompt to be answered (Value Object)
///
/// Always holds non-blank text. The raw text is kept as typed by the user;
/// only the emptiness check looks at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PromptRequest {
    content: String,
}

impl PromptRequest {
    /// Create a new prompt, rejecting empty or whitespace-only text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "prompt must not be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for PromptRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for PromptRequest {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl From<PromptRequest> for String {
    fn from(prompt: PromptRequest) -> Self {
        prompt.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_creation() {
        let p = PromptRequest::try_new("What is Rust?").unwrap();
        assert_eq!(p.content(), "What is Rust?");
    }

    #[test]
    fn test_keeps_surrounding_whitespace() {
        let p = PromptRequest::try_new("  hi  ").unwrap();
        assert_eq!(p.content(), "  hi  ");
    }

    #[test]
    fn test_try_new_blank() {
        assert!(PromptRequest::try_new("").is_err());
        assert!(PromptRequest::try_new("   ").is_err());
        assert!(PromptRequest::try_new("\n\t").is_err());
    }

    #[test]
    fn test_blank_is_invalid_input() {
        let err = PromptRequest::try_new(" ").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<PromptRequest>("\"  \"").is_err());
        let p: PromptRequest = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(p.content(), "hello");
    }
}
