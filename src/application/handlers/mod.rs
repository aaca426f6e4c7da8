//! Application handlers.
//!
//! Use cases that coordinate the domain with the assistant service port.

pub mod conversation;
pub mod run;

pub use conversation::{ConversationOrchestrator, TurnError};
pub use run::{RunPoller, NO_MESSAGE_DETAIL};
