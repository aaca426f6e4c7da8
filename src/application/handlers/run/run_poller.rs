//! RunPoller - submits one prompt as a run and waits for it to finish.
//!
//! The remote service owns the run's status; the poller only reads it. Each
//! status check is preceded by one fixed `poll_interval` sleep, and the total
//! number of checks is capped by `PollPolicy::max_attempts`.

use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::conversation::Role;
use crate::domain::foundation::{AssistantId, StateMachine, ThreadId};
use crate::domain::run::{PollPolicy, RunOutcome, RunStatus};
use crate::ports::{AssistantApi, AssistantApiError, Run};

/// Detail recorded when a completed run leaves no text to show.
pub const NO_MESSAGE_DETAIL: &str = "completed run produced no message";

/// Drives a single run from submission to a terminal outcome.
pub struct RunPoller<A>
where
    A: AssistantApi,
{
    api: Arc<A>,
    assistant_id: AssistantId,
    policy: PollPolicy,
}

impl<A> RunPoller<A>
where
    A: AssistantApi + 'static,
{
    /// Creates a poller for the given assistant.
    pub fn new(api: Arc<A>, assistant_id: AssistantId, policy: PollPolicy) -> Self {
        Self {
            api,
            assistant_id,
            policy,
        }
    }

    /// The policy this poller waits with.
    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Posts `prompt` to the thread, starts a run and waits for it.
    ///
    /// Never returns an error: transport failures become
    /// `RunOutcome::Failure` carrying the last status observed.
    pub async fn submit_and_wait(&self, thread_id: &ThreadId, prompt: &str) -> RunOutcome {
        if let Err(err) = self.api.create_message(thread_id, Role::User, prompt).await {
            warn!(thread_id = %thread_id, error = %err, "Failed to post message");
            return transport_failure(RunStatus::Failed, err);
        }

        let run = match self.api.create_run(thread_id, &self.assistant_id).await {
            Ok(run) => run,
            Err(err) => {
                warn!(thread_id = %thread_id, error = %err, "Failed to start run");
                return transport_failure(RunStatus::Failed, err);
            }
        };
        info!(
            thread_id = %thread_id,
            run_id = %run.id,
            status = %run.status,
            "Run submitted"
        );

        let run = match self.wait_for_terminal(thread_id, run).await {
            Ok(run) => run,
            Err(outcome) => return outcome,
        };

        if run.status.is_success() {
            return self.fetch_answer(thread_id, &run).await;
        }

        warn!(
            thread_id = %thread_id,
            run_id = %run.id,
            status = %run.status,
            last_error = run.last_error.as_deref().unwrap_or(""),
            "Run ended without an answer"
        );
        match run.last_error {
            Some(detail) => RunOutcome::failed_with(run.status, detail),
            None => RunOutcome::failed(run.status),
        }
    }

    /// Polls until the run leaves the pending states or the budget runs out.
    ///
    /// Returns the terminal run, or the outcome to report if polling stopped
    /// early (timeout or transport failure).
    async fn wait_for_terminal(&self, thread_id: &ThreadId, mut run: Run) -> Result<Run, RunOutcome> {
        let mut remaining = self.policy.max_attempts;

        while run.status.is_pending() && remaining > 0 {
            sleep(self.policy.poll_interval).await;
            remaining -= 1;
            let attempt = self.policy.max_attempts - remaining;

            let polled = match self.api.get_run(thread_id, &run.id).await {
                Ok(polled) => polled,
                Err(err) => {
                    warn!(
                        thread_id = %thread_id,
                        run_id = %run.id,
                        attempt,
                        error = %err,
                        "Failed to check run status"
                    );
                    return Err(transport_failure(run.status, err));
                }
            };

            if polled.status != run.status && !run.status.can_transition_to(&polled.status) {
                warn!(
                    run_id = %run.id,
                    from = %run.status,
                    to = %polled.status,
                    "Unexpected run status transition"
                );
            }
            debug!(run_id = %run.id, attempt, status = %polled.status, "Checked run status");
            run = polled;
        }

        if run.status.is_pending() {
            warn!(
                thread_id = %thread_id,
                run_id = %run.id,
                status = %run.status,
                attempts = self.policy.max_attempts,
                "Run did not finish within the attempt budget"
            );
            return Err(RunOutcome::Timeout {
                attempts: self.policy.max_attempts,
            });
        }
        Ok(run)
    }

    /// Reads the most recent message of the thread as the run's answer.
    async fn fetch_answer(&self, thread_id: &ThreadId, run: &Run) -> RunOutcome {
        let messages = match self.api.list_messages(thread_id).await {
            Ok(messages) => messages,
            Err(err) => {
                warn!(thread_id = %thread_id, run_id = %run.id, error = %err, "Failed to list messages");
                return transport_failure(run.status, err);
            }
        };

        let Some(newest) = messages.into_iter().next() else {
            return RunOutcome::failed_with(run.status, NO_MESSAGE_DETAIL);
        };

        if let Some(author_run) = newest.run_id.as_ref().filter(|id| **id != run.id) {
            warn!(
                run_id = %run.id,
                message_run_id = %author_run,
                "Newest message belongs to a different run"
            );
        }

        match newest.text {
            Some(text) => {
                info!(thread_id = %thread_id, run_id = %run.id, "Run completed");
                RunOutcome::success(text)
            }
            None => RunOutcome::failed_with(run.status, NO_MESSAGE_DETAIL),
        }
    }
}

fn transport_failure(last_status: RunStatus, err: AssistantApiError) -> RunOutcome {
    RunOutcome::failed_with(last_status, err.to_string())
}
