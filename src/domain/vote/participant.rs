//! Participant record - one member's vote on one debate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DiscussionId, MemberId, Timestamp};

use super::VoteType;

/// Ledger entry recording that a member voted on a debate.
///
/// Uniqueness per `(discussion_id, member_id)` is enforced at the
/// persistence layer; a second insert surfaces as a duplicate-vote error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    discussion_id: DiscussionId,
    member_id: MemberId,
    vote_type: VoteType,
    voted_at: Timestamp,
}

impl Participant {
    pub fn new(
        discussion_id: DiscussionId,
        member_id: MemberId,
        vote_type: VoteType,
        voted_at: Timestamp,
    ) -> Self {
        Self {
            discussion_id,
            member_id,
            vote_type,
            voted_at,
        }
    }

    pub fn discussion_id(&self) -> DiscussionId {
        self.discussion_id
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn vote_type(&self) -> VoteType {
        self.vote_type
    }

    pub fn voted_at(&self) -> Timestamp {
        self.voted_at
    }
}
