//! Run handlers - submitting prompts and waiting for runs.

mod run_poller;

pub use run_poller::{RunPoller, NO_MESSAGE_DETAIL};
