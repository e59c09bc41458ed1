//! Discussion lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::StateMachine;

/// Temporal phase of a debate.
///
/// The walk is monotonic forward only: `Waiting -> Ongoing -> Analyzing ->
/// Closed`. Visibility blocking is a separate orthogonal flag
/// (`ViewStatus`), not a lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscussionStatus {
    /// Registered, waiting for the open trigger at start date.
    Waiting,
    /// Open for comments and votes.
    Ongoing,
    /// Close trigger fired; waiting on the analysis result.
    Analyzing,
    /// Analysis applied; terminal.
    Closed,
}

impl StateMachine for DiscussionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DiscussionStatus::*;
        matches!(
            (self, target),
            (Waiting, Ongoing) | (Ongoing, Analyzing) | (Analyzing, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DiscussionStatus::*;
        match self {
            Waiting => vec![Ongoing],
            Ongoing => vec![Analyzing],
            Analyzing => vec![Closed],
            Closed => vec![],
        }
    }
}

impl DiscussionStatus {
    /// Stable string form used by persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscussionStatus::Waiting => "WAITING",
            DiscussionStatus::Ongoing => "ONGOING",
            DiscussionStatus::Analyzing => "ANALYZING",
            DiscussionStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for DiscussionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DiscussionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(DiscussionStatus::Waiting),
            "ONGOING" => Ok(DiscussionStatus::Ongoing),
            "ANALYZING" => Ok(DiscussionStatus::Analyzing),
            "CLOSED" => Ok(DiscussionStatus::Closed),
            other => Err(format!("Unknown discussion status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_walk_is_forward_only() {
        use DiscussionStatus::*;
        assert!(Waiting.can_transition_to(&Ongoing));
        assert!(Ongoing.can_transition_to(&Analyzing));
        assert!(Analyzing.can_transition_to(&Closed));

        assert!(!Ongoing.can_transition_to(&Waiting));
        assert!(!Analyzing.can_transition_to(&Ongoing));
        assert!(!Closed.can_transition_to(&Analyzing));
        assert!(!Waiting.can_transition_to(&Analyzing));
        assert!(!Waiting.can_transition_to(&Closed));
    }

    #[test]
    fn closed_is_terminal() {
        assert!(DiscussionStatus::Closed.is_terminal());
        assert!(!DiscussionStatus::Waiting.is_terminal());
    }

    #[test]
    fn status_round_trips_through_string_form() {
        for status in [
            DiscussionStatus::Waiting,
            DiscussionStatus::Ongoing,
            DiscussionStatus::Analyzing,
            DiscussionStatus::Closed,
        ] {
            let parsed: DiscussionStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_rejects_unknown_string() {
        assert!("OPEN".parse::<DiscussionStatus>().is_err());
    }
}
