//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod chat_turn;
pub mod history;
pub mod orchestrate;
