//! Run outcome - the single value a submitted turn resolves to.

use serde::{Deserialize, Serialize};

use super::RunStatus;

/// Result of waiting for one run.
///
/// The caller always receives exactly one of these; there is no partial
/// answer on `Failure` or `Timeout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The run completed and this is the raw text of its answer.
    Success { raw_text: String },

    /// The run reached a failure terminal, or the service could not be reached.
    Failure {
        last_status: RunStatus,
        /// Transport or protocol detail, when the failure did not come from the run itself.
        detail: Option<String>,
    },

    /// The attempt budget ran out while the run was still pending.
    Timeout { attempts: u32 },
}

impl RunOutcome {
    /// Creates a success outcome.
    pub fn success(raw_text: impl Into<String>) -> Self {
        Self::Success {
            raw_text: raw_text.into(),
        }
    }

    /// Creates a failure outcome reported by the service.
    pub fn failed(last_status: RunStatus) -> Self {
        Self::Failure {
            last_status,
            detail: None,
        }
    }

    /// Creates a failure outcome with extra detail.
    pub fn failed_with(last_status: RunStatus, detail: impl Into<String>) -> Self {
        Self::Failure {
            last_status,
            detail: Some(detail.into()),
        }
    }

    /// Returns true for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }
}
