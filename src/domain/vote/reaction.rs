//! Reaction record - one member's like/dislike on one comment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, MemberId, Timestamp};

/// Kind of reaction a member leaves on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Stable string form used by persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "LIKE",
            ReactionKind::Dislike => "DISLIKE",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIKE" => Ok(ReactionKind::Like),
            "DISLIKE" => Ok(ReactionKind::Dislike),
            other => Err(format!("Unknown reaction kind: {}", other)),
        }
    }
}

/// Ledger entry recording that a member reacted to a comment.
///
/// One reaction per `(comment_id, member_id)`, either kind. Uniqueness is
/// enforced by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    comment_id: CommentId,
    member_id: MemberId,
    kind: ReactionKind,
    reacted_at: Timestamp,
}

impl Reaction {
    pub fn new(
        comment_id: CommentId,
        member_id: MemberId,
        kind: ReactionKind,
        reacted_at: Timestamp,
    ) -> Self {
        Self {
            comment_id,
            member_id,
            kind,
            reacted_at,
        }
    }

    pub fn comment_id(&self) -> CommentId {
        self.comment_id
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn kind(&self) -> ReactionKind {
        self.kind
    }

    pub fn reacted_at(&self) -> Timestamp {
        self.reacted_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_kind_round_trips_through_string_form() {
        for kind in [ReactionKind::Like, ReactionKind::Dislike] {
            let parsed: ReactionKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("HEART".parse::<ReactionKind>().is_err());
    }

    #[test]
    fn reaction_records_the_kind() {
        let reaction = Reaction::new(
            CommentId::new(4),
            MemberId::new(2),
            ReactionKind::Like,
            Timestamp::now(),
        );
        assert_eq!(reaction.kind(), ReactionKind::Like);
        assert_eq!(reaction.comment_id(), CommentId::new(4));
    }
}
