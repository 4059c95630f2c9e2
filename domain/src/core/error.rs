//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid user name: {0}")]
    InvalidUserName(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

impl DomainError {
    /// Check if this error was caused by rejected user input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DomainError::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let error = DomainError::InvalidInput("prompt is empty".to_string());
        assert_eq!(error.to_string(), "Invalid input: prompt is empty");
    }

    #[test]
    fn test_is_invalid_input_check() {
        assert!(DomainError::InvalidInput("x".to_string()).is_invalid_input());
        assert!(!DomainError::UnknownProvider("x".to_string()).is_invalid_input());
        assert!(!DomainError::InvalidUserName("".to_string()).is_invalid_input());
    }
}
