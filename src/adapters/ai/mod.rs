//! Assistant API Adapters.
//!
//! Implementations of the AssistantApi port.
//!
//! ## Available Adapters
//!
//! - `OpenAIAssistantsProvider` - OpenAI Assistants v2 over HTTPS
//! - `MockAssistantApi` - Scriptable mock for testing

mod mock_assistant;
mod openai_assistants;

pub use mock_assistant::{MockAssistantApi, MockCalls, MockError, PostedMessage};
pub use openai_assistants::{OpenAIAssistantsConfig, OpenAIAssistantsProvider, DEFAULT_BASE_URL};
