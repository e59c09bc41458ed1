//! Reaction ledger port.

use async_trait::async_trait;

use crate::domain::foundation::{CommentId, DomainError, MemberId};
use crate::domain::vote::{Reaction, ReactionKind};

/// Ledger port for comment reactions.
///
/// One row per `(comment_id, member_id)`, enforced by the store.
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Insert a reaction record.
    ///
    /// # Errors
    ///
    /// - `DuplicateReaction` if the member already reacted to this comment
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, reaction: &Reaction) -> Result<(), DomainError>;

    /// Kind the member reacted with on this comment, if any.
    async fn find_reaction(
        &self,
        comment_id: CommentId,
        member_id: MemberId,
    ) -> Result<Option<ReactionKind>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn reaction_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ReactionRepository) {}
    }
}
