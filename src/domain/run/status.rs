//! Run status - lifecycle of one remote assistant run.
//!
//! The status is owned by the assistant service; this client only observes it.
//!
//! ```text
//! queued ──► in_progress ──► completed
//!   │  ▲         │  ├──► requires_action ──► in_progress
//!   │  └─────────┘  ├──► failed | incomplete | expired
//!   └──► cancelling ──► cancelled
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle stage of a run as reported by the assistant service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Accepted, waiting for capacity.
    Queued,
    /// The model is executing against the thread.
    InProgress,
    /// The run is waiting for tool outputs from the client.
    RequiresAction,
    /// Cancellation was requested and is being processed.
    Cancelling,
    /// The run was cancelled.
    Cancelled,
    /// The run failed.
    Failed,
    /// The run finished and produced its answer.
    Completed,
    /// The run ended early (token limits, content filtering).
    Incomplete,
    /// The run was not finished before the service deadline.
    Expired,
}

impl RunStatus {
    /// Returns true while the run may still reach a terminal state on its own.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling
        )
    }

    /// Returns true for the only success terminal.
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }

    /// Returns true for statuses that end the wait without an answer.
    ///
    /// `RequiresAction` is included: this client never submits tool outputs,
    /// so a run in that state cannot make progress.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RunStatus::Failed
                | RunStatus::Cancelled
                | RunStatus::Expired
                | RunStatus::Incomplete
                | RunStatus::RequiresAction
        )
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for RunStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use RunStatus::*;
        match self {
            Queued => vec![InProgress, Cancelling, Failed, Expired],
            InProgress => vec![
                // the service may requeue a run it already started
                Queued,
                RequiresAction,
                Cancelling,
                Completed,
                Failed,
                Incomplete,
                Expired,
            ],
            RequiresAction => vec![InProgress, Cancelling, Expired],
            Cancelling => vec![Cancelled, Completed, Failed],
            Cancelled | Failed | Completed | Incomplete | Expired => vec![],
        }
    }
}
