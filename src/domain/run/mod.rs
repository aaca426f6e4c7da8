//! Run module - remote run lifecycle, poll policy and outcomes.

mod outcome;
mod policy;
mod status;

pub use outcome::RunOutcome;
pub use policy::{PollPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use status::RunStatus;
