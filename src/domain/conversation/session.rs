//! Session context - one user's conversation with the assistant.
//!
//! Binds the remote thread identity to the local transcript. A context is
//! created per session, handed by `&mut` to every operation, and dropped
//! when the session ends; nothing about it is global.

use tracing::info;

use crate::domain::foundation::{SessionId, ThreadId};
use crate::ports::{AssistantApi, AssistantApiError};

use super::transcript::{Role, Transcript, TranscriptEntry};

/// Per-session conversation state.
///
/// # Invariants
///
/// - at most one thread id per session, never reassigned once set
/// - the transcript is owned exclusively by this context
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    id: SessionId,
    thread_id: Option<ThreadId>,
    transcript: Transcript,
}

impl SessionContext {
    /// Creates a fresh session with no thread and an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Local identifier used to correlate logs.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The remote thread, once one has been created.
    pub fn thread_id(&self) -> Option<&ThreadId> {
        self.thread_id.as_ref()
    }

    /// Creates the remote thread on first use; later calls make no remote call.
    ///
    /// # Errors
    ///
    /// Returns the service error if the thread cannot be created. The session
    /// stays without a thread and the next call tries again.
    pub async fn ensure_session<A>(&mut self, api: &A) -> Result<&ThreadId, AssistantApiError>
    where
        A: AssistantApi + ?Sized,
    {
        let thread_id = match self.thread_id.take() {
            Some(existing) => existing,
            None => {
                let created = api.create_thread().await?;
                info!(session_id = %self.id, thread_id = %created, "Created assistant thread");
                created
            }
        };
        let thread_id: &ThreadId = self.thread_id.insert(thread_id);
        Ok(thread_id)
    }

    /// Appends a transcript entry.
    pub fn append(&mut self, role: Role, text: impl Into<String>) -> &TranscriptEntry {
        self.transcript.append(role, text)
    }

    /// All transcript entries in display order.
    pub fn all(&self) -> &[TranscriptEntry] {
        self.transcript.all()
    }

    /// Read access to the transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns true before anything has been shown to the user.
    pub fn is_fresh(&self) -> bool {
        self.transcript.is_empty()
    }
}
