//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machines)
//! - `run` - Remote run lifecycle, poll policy and outcomes
//! - `conversation` - Session, transcript, dataset and answer sanitizing

pub mod conversation;
pub mod foundation;
pub mod run;
