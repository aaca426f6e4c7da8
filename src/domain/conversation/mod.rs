//! Conversation module - session state, transcript and answer post-processing.
//!
//! # Key Types
//!
//! - `SessionContext` - Thread identity plus transcript for one session
//! - `Transcript` / `TranscriptEntry` - Append-only record of turns
//! - `ResponseSanitizer` - Strips citation markers from answers
//! - `Dataset` - CSV table appended to every prompt
//! - `example_questions` - Canned prompts for new users

mod dataset;
mod question_bank;
mod sanitizer;
mod session;
mod transcript;

pub use dataset::{Dataset, DatasetError, DATA_SECTION_HEADER};
pub use question_bank::{example_questions, find_example, ExampleQuestion};
pub use sanitizer::ResponseSanitizer;
pub use session::SessionContext;
pub use transcript::{Role, Transcript, TranscriptEntry};

/// Assistant turn shown before the user asks anything.
pub const GREETING: &str = "Hello! How can I assist you today? You can ask me about your data, type /examples to see some example questions.";

/// Assistant turn recorded when a question could not be answered.
pub const ERROR_SENTINEL: &str = "ERROR";
