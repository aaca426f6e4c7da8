//! State machine trait for status enums.
//!
//! Statuses owned by a remote service are only observed, never driven, so
//! callers use `can_transition_to` to flag surprising observations rather
//! than to reject changes.

/// Trait for status enums that represent state machines.
///
/// Implementors list the valid targets of each state and get the transition
/// check for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for RunStatus {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Queued => vec![InProgress, Cancelling, Failed, Expired],
///             // ... etc
///         }
///     }
/// }
///
/// if !previous.can_transition_to(&observed) {
///     warn!("unexpected transition");
/// }
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }
}
