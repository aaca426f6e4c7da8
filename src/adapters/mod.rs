//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Assistant service clients (OpenAI Assistants, mock)
//! - `dataset` - Dataset loading from the filesystem

pub mod ai;
pub mod dataset;

pub use ai::{MockAssistantApi, OpenAIAssistantsConfig, OpenAIAssistantsProvider};
pub use dataset::CsvFileLoader;
