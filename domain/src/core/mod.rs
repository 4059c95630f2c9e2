//! Core domain concepts shared across all subdomains.
//!
//! - [`prompt::PromptRequest`] - a validated user prompt
//! - [`provider::ProviderId`] - which of the two providers produced a result
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod prompt;
pub mod provider;
pub mod string;
