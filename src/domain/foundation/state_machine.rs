//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions across entity lifecycle statuses (Discussion, Report).

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free. Lifecycle statuses in this domain only
/// ever move forward; a status with no outgoing transitions is terminal.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DiscussionStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (Waiting, Ongoing) | (Ongoing, Analyzing) | (Analyzing, Closed)
///         )
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Waiting => vec![Ongoing],
///             // ... etc
///         }
///     }
/// }
///
/// let next = current.transition_to(DiscussionStatus::Ongoing)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    ///
    /// This is the preferred way to change state, as it ensures
    /// the transition is valid according to the state machine rules.
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

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal two-phase machine to exercise the trait defaults; the real
    // lifecycle machines live in the discussion and report modules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum GateStatus {
        Open,
        Shut,
    }

    impl StateMachine for GateStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            matches!((self, target), (GateStatus::Open, GateStatus::Shut))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                GateStatus::Open => vec![GateStatus::Shut],
                GateStatus::Shut => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = GateStatus::Open.transition_to(GateStatus::Shut);
        assert_eq!(result, Ok(GateStatus::Shut));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = GateStatus::Shut.transition_to(GateStatus::Open);
        assert!(result.is_err());
    }

    #[test]
    fn is_terminal_reflects_outgoing_transitions() {
        assert!(GateStatus::Shut.is_terminal());
        assert!(!GateStatus::Open.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [GateStatus::Open, GateStatus::Shut] {
            for valid_target in status.valid_transitions() {
                assert!(
                    status.can_transition_to(&valid_target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    status,
                    valid_target
                );
            }
        }
    }
}
