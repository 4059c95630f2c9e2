//! Interactive chat module
//!
//! Provides a line-editor based chat interface.

mod repl;

pub use repl::{ChatRepl, ReplCommand, ReplInput};
