//! ConversationOrchestrator - drives one user turn end to end.
//!
//! A turn appends the user's question to the transcript, asks the assistant
//! through the `RunPoller`, and appends either the cleaned answer or the
//! `ERROR` sentinel. Callers also receive a typed result so they can render
//! failures their own way.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::handlers::run::RunPoller;
use crate::domain::conversation::{
    Dataset, ResponseSanitizer, Role, SessionContext, ERROR_SENTINEL, GREETING,
};
use crate::domain::foundation::AssistantId;
use crate::domain::run::{PollPolicy, RunOutcome, RunStatus};
use crate::ports::{AssistantApi, AssistantApiError};

/// Why a turn produced no answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    /// The run ended in a failure state or the service could not be reached.
    #[error("Run failed with status {status}{}", detail_suffix(.detail))]
    RunFailed {
        status: RunStatus,
        detail: Option<String>,
    },

    /// The run was still pending after every allowed status check.
    #[error("Run did not finish after {attempts} status checks")]
    PollTimeout { attempts: u32 },

    /// The conversation thread could not be created.
    #[error("Could not start assistant thread: {0}")]
    Session(#[from] AssistantApiError),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// Top-level driver for a conversation with the assistant.
pub struct ConversationOrchestrator<A>
where
    A: AssistantApi,
{
    api: Arc<A>,
    poller: RunPoller<A>,
    sanitizer: ResponseSanitizer,
}

impl<A> ConversationOrchestrator<A>
where
    A: AssistantApi + 'static,
{
    /// Creates an orchestrator that runs `assistant_id` under `policy`.
    pub fn new(api: Arc<A>, assistant_id: AssistantId, policy: PollPolicy) -> Self {
        let poller = RunPoller::new(Arc::clone(&api), assistant_id, policy);
        Self {
            api,
            poller,
            sanitizer: ResponseSanitizer::new(),
        }
    }

    /// Binds the session to a thread and greets a fresh transcript.
    ///
    /// # Errors
    ///
    /// Returns `TurnError::Session` if the thread cannot be created; the
    /// transcript is left untouched.
    pub async fn start_session(&self, session: &mut SessionContext) -> Result<(), TurnError> {
        session.ensure_session(self.api.as_ref()).await?;
        greet_if_fresh(session);
        Ok(())
    }

    /// Handles one user question against the dataset.
    ///
    /// Always leaves the transcript with the user's entry followed by one
    /// assistant entry: the cleaned answer on success, `ERROR` otherwise.
    ///
    /// # Errors
    ///
    /// - `Session` if no thread could be created
    /// - `RunFailed` if the run failed or the service could not be reached
    /// - `PollTimeout` if the run did not finish in time
    pub async fn handle_input(
        &self,
        session: &mut SessionContext,
        user_text: &str,
        dataset: &Dataset,
    ) -> Result<String, TurnError> {
        greet_if_fresh(session);
        session.append(Role::User, user_text);

        let session_id = session.id();
        let thread_id = match session.ensure_session(self.api.as_ref()).await {
            Ok(thread_id) => thread_id.clone(),
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "Turn failed: no thread");
                session.append(Role::Assistant, ERROR_SENTINEL);
                return Err(TurnError::Session(err));
            }
        };

        let prompt = dataset.compose_prompt(user_text);
        let outcome = self.poller.submit_and_wait(&thread_id, &prompt).await;

        let err = match outcome {
            RunOutcome::Success { raw_text } => {
                let answer = self.sanitizer.clean(&raw_text);
                session.append(Role::Assistant, answer.as_str());
                info!(session_id = %session_id, thread_id = %thread_id, "Turn answered");
                return Ok(answer);
            }
            RunOutcome::Failure {
                last_status,
                detail,
            } => TurnError::RunFailed {
                status: last_status,
                detail,
            },
            RunOutcome::Timeout { attempts } => TurnError::PollTimeout { attempts },
        };

        session.append(Role::Assistant, ERROR_SENTINEL);
        warn!(session_id = %session_id, thread_id = %thread_id, error = %err, "Turn failed");
        Err(err)
    }
}

fn greet_if_fresh(session: &mut SessionContext) {
    if session.is_fresh() {
        session.append(Role::Assistant, GREETING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAssistantApi, MockError};

    fn dataset() -> Dataset {
        Dataset::from_csv_text("data.csv", "a,b\n1,2\n").unwrap()
    }

    fn orchestrator(api: &MockAssistantApi) -> ConversationOrchestrator<MockAssistantApi> {
        ConversationOrchestrator::new(
            Arc::new(api.clone()),
            AssistantId::new("asst_test").unwrap(),
            PollPolicy::immediate(3),
        )
    }

    fn texts(session: &SessionContext) -> Vec<(Role, String)> {
        session
            .all()
            .iter()
            .map(|e| (e.role(), e.text().to_string()))
            .collect()
    }

    #[tokio::test]
    async fn start_session_greets_once() {
        let api = MockAssistantApi::new();
        let orchestrator = orchestrator(&api);
        let mut session = SessionContext::new();

        orchestrator.start_session(&mut session).await.unwrap();
        orchestrator.start_session(&mut session).await.unwrap();

        assert_eq!(texts(&session), vec![(Role::Assistant, GREETING.to_string())]);
        assert_eq!(api.calls().create_thread, 1);
        assert_eq!(api.calls().create_run, 0);
    }

    #[tokio::test]
    async fn start_session_failure_leaves_transcript_empty() {
        let api = MockAssistantApi::new().with_thread_error(MockError::AuthenticationFailed);
        let mut session = SessionContext::new();

        let result = orchestrator(&api).start_session(&mut session).await;

        assert_eq!(
            result,
            Err(TurnError::Session(AssistantApiError::AuthenticationFailed))
        );
        assert!(session.transcript().is_empty());
        assert!(session.thread_id().is_none());
    }

    #[tokio::test]
    async fn successful_turn_appends_clean_answer() {
        let api = MockAssistantApi::new()
            .with_statuses([RunStatus::Completed])
            .with_answer("Two columns【3:0†data.csv】.");
        let mut session = SessionContext::new();

        let answer = orchestrator(&api)
            .handle_input(&mut session, "Describe the file", &dataset())
            .await
            .unwrap();

        assert_eq!(answer, "Two columns.");
        assert_eq!(
            texts(&session),
            vec![
                (Role::Assistant, GREETING.to_string()),
                (Role::User, "Describe the file".to_string()),
                (Role::Assistant, "Two columns.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn prompt_carries_dataset_but_transcript_does_not() {
        let api = MockAssistantApi::new()
            .with_statuses([RunStatus::Completed])
            .with_answer("ok");
        let mut session = SessionContext::new();

        orchestrator(&api)
            .handle_input(&mut session, "Count rows", &dataset())
            .await
            .unwrap();

        let posted = api.posted_messages();
        assert_eq!(posted[0].text, "Count rows\n\nData File Content:\na,b\n1,2\n");
        assert_eq!(session.all()[1].text(), "Count rows");
    }

    #[tokio::test]
    async fn failed_run_appends_sentinel() {
        let api = MockAssistantApi::new().with_statuses([RunStatus::Expired]);
        let mut session = SessionContext::new();

        let result = orchestrator(&api)
            .handle_input(&mut session, "q", &dataset())
            .await;

        assert_eq!(
            result,
            Err(TurnError::RunFailed {
                status: RunStatus::Expired,
                detail: None
            })
        );
        assert_eq!(session.transcript().last().unwrap().text(), ERROR_SENTINEL);
    }

    #[tokio::test]
    async fn timeout_appends_sentinel() {
        let api = MockAssistantApi::new().with_statuses([RunStatus::InProgress]);
        let mut session = SessionContext::new();

        let result = orchestrator(&api)
            .handle_input(&mut session, "q", &dataset())
            .await;

        assert_eq!(result, Err(TurnError::PollTimeout { attempts: 3 }));
        assert_eq!(session.transcript().last().unwrap().text(), ERROR_SENTINEL);
    }

    #[tokio::test]
    async fn thread_failure_is_a_failed_turn() {
        let api = MockAssistantApi::new().with_thread_error(MockError::Network {
            message: "dns".to_string(),
        });
        let mut session = SessionContext::new();

        let result = orchestrator(&api)
            .handle_input(&mut session, "q", &dataset())
            .await;

        assert!(matches!(result, Err(TurnError::Session(_))));
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript().last().unwrap().text(), ERROR_SENTINEL);
        assert_eq!(api.calls().create_message, 0);
    }

    #[tokio::test]
    async fn turns_reuse_the_same_thread() {
        let api = MockAssistantApi::new()
            .with_thread_id("thread_keep")
            .with_statuses([RunStatus::Completed])
            .with_answer("a");
        let orchestrator = orchestrator(&api);
        let mut session = SessionContext::new();

        orchestrator.handle_input(&mut session, "one", &dataset()).await.unwrap();
        orchestrator.handle_input(&mut session, "two", &dataset()).await.unwrap();

        assert_eq!(api.calls().create_thread, 1);
        assert!(api
            .posted_messages()
            .iter()
            .all(|m| m.thread_id.as_str() == "thread_keep"));
        assert_eq!(session.transcript().len(), 5);
    }

    #[test]
    fn turn_error_messages() {
        let err = TurnError::RunFailed {
            status: RunStatus::Failed,
            detail: Some("server_error: boom".to_string()),
        };
        assert_eq!(err.to_string(), "Run failed with status failed: server_error: boom");

        let err = TurnError::RunFailed {
            status: RunStatus::Cancelled,
            detail: None,
        };
        assert_eq!(err.to_string(), "Run failed with status cancelled");

        let err = TurnError::PollTimeout { attempts: 50 };
        assert_eq!(err.to_string(), "Run did not finish after 50 status checks");
    }
}
