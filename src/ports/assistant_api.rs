//! Assistant API Port - Interface for the remote assistant run service.
//!
//! The service keeps a server-side conversation ("thread"), accepts messages
//! on it, and executes asynchronous jobs ("runs") of a pre-configured
//! assistant against the thread's accumulated context.
//!
//! # Design
//!
//! - Thread, run and assistant identifiers are opaque to the client
//! - Run status is owned by the service; clients only read it
//! - `list_messages` returns the newest message first
//!
//! # Example
//!
//! ```ignore
//! let thread_id = api.create_thread().await?;
//! api.create_message(&thread_id, Role::User, "How many rows?").await?;
//! let run = api.create_run(&thread_id, &assistant_id).await?;
//! let run = api.get_run(&thread_id, &run.id).await?;
//! if run.status.is_success() {
//!     let newest = api.list_messages(&thread_id).await?.into_iter().next();
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::Role;
use crate::domain::foundation::{AssistantId, RunId, ThreadId, Timestamp};
use crate::domain::run::RunStatus;

/// Port for the remote assistant service.
///
/// Implementations translate between the provider's wire format and these
/// domain types. Every method is a single remote call; retry policy for
/// transport failures belongs to the implementation.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Creates a new, empty thread.
    async fn create_thread(&self) -> Result<ThreadId, AssistantApiError>;

    /// Appends a message to a thread's remote history.
    async fn create_message(
        &self,
        thread_id: &ThreadId,
        role: Role,
        text: &str,
    ) -> Result<(), AssistantApiError>;

    /// Starts a run of the given assistant against the thread.
    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<Run, AssistantApiError>;

    /// Fetches the current state of a run.
    async fn get_run(&self, thread_id: &ThreadId, run_id: &RunId) -> Result<Run, AssistantApiError>;

    /// Lists the thread's messages, most recent first.
    async fn list_messages(&self, thread_id: &ThreadId)
        -> Result<Vec<ThreadMessage>, AssistantApiError>;

    /// Get provider information (name, endpoint).
    fn provider_info(&self) -> ProviderInfo;
}

/// Snapshot of a run as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Run identifier.
    pub id: RunId,
    /// Current lifecycle stage.
    pub status: RunStatus,
    /// Error message the service attached to a failed run, if any.
    pub last_error: Option<String>,
}

impl Run {
    /// Creates a run snapshot without error detail.
    pub fn new(id: RunId, status: RunStatus) -> Self {
        Self {
            id,
            status,
            last_error: None,
        }
    }

    /// Attaches the service's error message.
    pub fn with_last_error(mut self, message: impl Into<String>) -> Self {
        self.last_error = Some(message.into());
        self
    }
}

/// A message stored on a remote thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    /// Who authored the message.
    pub role: Role,
    /// First text part of the message; `None` if it carries no text.
    pub text: Option<String>,
    /// Run that produced the message, for assistant messages.
    pub run_id: Option<RunId>,
    /// When the service stored the message.
    pub created_at: Option<Timestamp>,
}

impl ThreadMessage {
    /// Creates an assistant message with text.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: Some(text.into()),
            run_id: None,
            created_at: None,
        }
    }

    /// Creates a user message with text.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: Some(text.into()),
            run_id: None,
            created_at: None,
        }
    }

    /// Sets the producing run.
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai", "mock").
    pub name: String,
    /// Base URL the provider talks to.
    pub endpoint: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Assistant service errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantApiError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Thread, run or assistant does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AssistantApiError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AssistantApiError::RateLimited { .. }
                | AssistantApiError::Unavailable { .. }
                | AssistantApiError::Network(_)
                | AssistantApiError::Timeout { .. }
        )
    }
}
