//! Mock Assistant API for testing.
//!
//! Provides a scriptable implementation of the AssistantApi port, allowing
//! tests to drive the run state machine without calling a real service.
//!
//! # Features
//!
//! - Scripted run status sequence (the last status repeats once exhausted)
//! - Static message listing, most recent first
//! - Error injection per operation
//! - Call counting for verification
//!
//! # Example
//!
//! ```ignore
//! let api = MockAssistantApi::new()
//!     .with_statuses([RunStatus::InProgress, RunStatus::Completed])
//!     .with_answer("Result: 42");
//!
//! let outcome = poller.submit_and_wait(&thread_id, "How many rows?").await;
//! assert_eq!(api.calls().get_run, 2);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::conversation::Role;
use crate::domain::foundation::{AssistantId, RunId, ThreadId};
use crate::domain::run::RunStatus;
use crate::ports::{AssistantApi, AssistantApiError, ProviderInfo, Run, ThreadMessage};

/// Mock assistant service for testing.
#[derive(Debug, Clone)]
pub struct MockAssistantApi {
    state: Arc<Mutex<MockState>>,
    info: ProviderInfo,
}

/// Number of calls made to each operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockCalls {
    pub create_thread: usize,
    pub create_message: usize,
    pub create_run: usize,
    pub get_run: usize,
    pub list_messages: usize,
}

/// A message posted through `create_message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub thread_id: ThreadId,
    pub role: Role,
    pub text: String,
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate a missing thread or run.
    NotFound { what: String },
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AssistantApiError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                AssistantApiError::rate_limited(retry_after_secs)
            }
            MockError::Unavailable { message } => AssistantApiError::unavailable(message),
            MockError::AuthenticationFailed => AssistantApiError::AuthenticationFailed,
            MockError::NotFound { what } => AssistantApiError::NotFound(what),
            MockError::Network { message } => AssistantApiError::network(message),
            MockError::Timeout { timeout_secs } => AssistantApiError::Timeout { timeout_secs },
        }
    }
}

#[derive(Debug)]
struct MockState {
    threads: VecDeque<Result<String, MockError>>,
    initial_status: RunStatus,
    statuses: VecDeque<Result<RunStatus, MockError>>,
    last_status: RunStatus,
    messages: Vec<ThreadMessage>,
    create_message_error: Option<MockError>,
    create_run_error: Option<MockError>,
    list_error: Option<MockError>,
    calls: MockCalls,
    posted: Vec<PostedMessage>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            threads: VecDeque::new(),
            initial_status: RunStatus::Queued,
            statuses: VecDeque::new(),
            last_status: RunStatus::Queued,
            messages: Vec::new(),
            create_message_error: None,
            create_run_error: None,
            list_error: None,
            calls: MockCalls::default(),
            posted: Vec::new(),
        }
    }
}

impl Default for MockAssistantApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAssistantApi {
    /// Creates a mock whose runs start `queued` and stay there.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            info: ProviderInfo::new("mock", "memory://assistant"),
        }
    }

    /// Queues the id returned by the next `create_thread`.
    pub fn with_thread_id(self, id: impl Into<String>) -> Self {
        self.state().threads.push_back(Ok(id.into()));
        self
    }

    /// Queues a failure for the next `create_thread`.
    pub fn with_thread_error(self, error: MockError) -> Self {
        self.state().threads.push_back(Err(error));
        self
    }

    /// Sets the status reported by `create_run`.
    pub fn with_initial_status(self, status: RunStatus) -> Self {
        {
            let mut state = self.state();
            state.initial_status = status;
            state.last_status = status;
        }
        self
    }

    /// Appends statuses reported by successive `get_run` calls.
    pub fn with_statuses(self, statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        self.state().statuses.extend(statuses.into_iter().map(Ok));
        self
    }

    /// Appends a failing `get_run` call to the status script.
    pub fn with_status_error(self, error: MockError) -> Self {
        self.state().statuses.push_back(Err(error));
        self
    }

    /// Replaces the message listing (most recent first).
    pub fn with_messages(self, messages: Vec<ThreadMessage>) -> Self {
        self.state().messages = messages;
        self
    }

    /// Puts an assistant answer at the top of the listing.
    pub fn with_answer(self, text: impl Into<String>) -> Self {
        self.state().messages.insert(0, ThreadMessage::assistant(text));
        self
    }

    /// Makes every `create_message` fail.
    pub fn with_create_message_error(self, error: MockError) -> Self {
        self.state().create_message_error = Some(error);
        self
    }

    /// Makes every `create_run` fail.
    pub fn with_create_run_error(self, error: MockError) -> Self {
        self.state().create_run_error = Some(error);
        self
    }

    /// Makes every `list_messages` fail.
    pub fn with_list_error(self, error: MockError) -> Self {
        self.state().list_error = Some(error);
        self
    }

    /// Returns the call counters.
    pub fn calls(&self) -> MockCalls {
        self.state().calls
    }

    /// Returns every message posted to the mock.
    pub fn posted_messages(&self) -> Vec<PostedMessage> {
        self.state().posted.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn mock_run_id(n: usize) -> Result<RunId, AssistantApiError> {
    RunId::new(format!("run_mock_{}", n)).map_err(|e| AssistantApiError::parse(e.to_string()))
}

#[async_trait]
impl AssistantApi for MockAssistantApi {
    async fn create_thread(&self) -> Result<ThreadId, AssistantApiError> {
        let mut state = self.state();
        state.calls.create_thread += 1;
        let n = state.calls.create_thread;
        let id = match state.threads.pop_front() {
            Some(Ok(id)) => id,
            Some(Err(err)) => return Err(err.into()),
            None => format!("thread_mock_{}", n),
        };
        ThreadId::new(id).map_err(|e| AssistantApiError::parse(e.to_string()))
    }

    async fn create_message(
        &self,
        thread_id: &ThreadId,
        role: Role,
        text: &str,
    ) -> Result<(), AssistantApiError> {
        let mut state = self.state();
        state.calls.create_message += 1;
        if let Some(err) = state.create_message_error.clone() {
            return Err(err.into());
        }
        state.posted.push(PostedMessage {
            thread_id: thread_id.clone(),
            role,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn create_run(
        &self,
        _thread_id: &ThreadId,
        _assistant_id: &AssistantId,
    ) -> Result<Run, AssistantApiError> {
        let mut state = self.state();
        state.calls.create_run += 1;
        if let Some(err) = state.create_run_error.clone() {
            return Err(err.into());
        }
        let id = mock_run_id(state.calls.create_run)?;
        state.last_status = state.initial_status;
        Ok(Run::new(id, state.initial_status))
    }

    async fn get_run(&self, _thread_id: &ThreadId, run_id: &RunId) -> Result<Run, AssistantApiError> {
        let mut state = self.state();
        state.calls.get_run += 1;
        let status = match state.statuses.pop_front() {
            Some(Ok(status)) => status,
            Some(Err(err)) => return Err(err.into()),
            None => state.last_status,
        };
        state.last_status = status;
        Ok(Run::new(run_id.clone(), status))
    }

    async fn list_messages(
        &self,
        _thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantApiError> {
        let mut state = self.state();
        state.calls.list_messages += 1;
        if let Some(err) = state.list_error.clone() {
            return Err(err.into());
        }
        Ok(state.messages.clone())
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
