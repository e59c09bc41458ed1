//! Strongly-typed identifier value objects.
//!
//! Discussions, comments, reports and members are identified by
//! monotonically increasing integers assigned by the persistence layer;
//! every list-style read paginates by these ids, so they must be ordered.
//! Timer ids come from the scheduler and carry no ordering, so they stay
//! UUID-backed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! sequential_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps an identifier assigned by the persistence layer.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the inner integer value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

sequential_id!(
    /// Unique identifier for a discussion (time-boxed book debate).
    DiscussionId
);

sequential_id!(
    /// Unique identifier for a comment within a discussion.
    CommentId
);

sequential_id!(
    /// Unique identifier for a moderation report.
    ReportId
);

sequential_id!(
    /// Member identifier, assigned by the surrounding identity layer.
    MemberId
);

/// Handle for a one-shot timer registered with the trigger scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(Uuid);

impl TimerId {
    /// Creates a new random TimerId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TimerId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TimerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TimerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discussion_id_preserves_value() {
        let id = DiscussionId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn discussion_id_parses_from_string() {
        let id: DiscussionId = "17".parse().unwrap();
        assert_eq!(id, DiscussionId::new(17));
    }

    #[test]
    fn discussion_id_rejects_non_numeric_string() {
        let result = "not-a-number".parse::<DiscussionId>();
        assert!(result.is_err());
    }

    #[test]
    fn sequential_ids_order_by_value() {
        assert!(CommentId::new(1) < CommentId::new(2));
        assert!(DiscussionId::new(100) > DiscussionId::new(99));
    }

    #[test]
    fn member_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&MemberId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn report_id_deserializes_from_plain_integer() {
        let id: ReportId = serde_json::from_str("99").unwrap();
        assert_eq!(id.value(), 99);
    }

    #[test]
    fn timer_id_generates_unique_values() {
        let id1 = TimerId::new();
        let id2 = TimerId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn timer_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TimerId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }
}
