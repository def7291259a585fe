//! State machine trait for UI-state enums.
//!
//! Draft panels and the profile editor are small finite-state machines.
//! Each status enum lists its legal transitions here and gets validated
//! transitions for free.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DraftStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Closed, Open) | (Open, Closed))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Closed => vec![Open],
///             Open => vec![Closed],
///         }
///     }
/// }
///
/// let status = DraftStatus::Closed.transition_to(DraftStatus::Open)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}
