//! Participant (vote) ledger port.

use async_trait::async_trait;

use crate::domain::foundation::{DiscussionId, DomainError, MemberId};
use crate::domain::vote::{Participant, VoteType};

/// Ledger port for debate votes.
///
/// One row per `(discussion_id, member_id)`, enforced by the store.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Insert a vote record.
    ///
    /// # Errors
    ///
    /// - `DuplicateVote` if the member already voted on this discussion
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, participant: &Participant) -> Result<(), DomainError>;

    /// Side the member voted on this discussion, if any.
    async fn find_vote(
        &self,
        discussion_id: DiscussionId,
        member_id: MemberId,
    ) -> Result<Option<VoteType>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn participant_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ParticipantRepository) {}
    }
}
