//! Prompt domain
//!
//! Templates for the prompt sent at each stage of the orchestration.

mod template;

pub use template::PromptTemplate;
