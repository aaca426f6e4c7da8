//! Conversation handlers.
//!
//! Turn-level orchestration of a session: greeting, question, answer.

mod orchestrator;

pub use orchestrator::{ConversationOrchestrator, TurnError};
