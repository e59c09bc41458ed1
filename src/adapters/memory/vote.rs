//! In-memory vote and reaction ledgers.

use async_trait::async_trait;

use crate::domain::foundation::{CommentId, DiscussionId, DomainError, ErrorCode, MemberId};
use crate::domain::vote::{Participant, Reaction, ReactionKind, VoteType};
use crate::ports::{ParticipantRepository, ReactionRepository};

use super::InMemoryStore;

#[async_trait]
impl ParticipantRepository for InMemoryStore {
    async fn insert(&self, participant: &Participant) -> Result<(), DomainError> {
        let key = (
            participant.discussion_id().value(),
            participant.member_id().value(),
        );
        let mut tables = self.lock();
        if tables.participants.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::DuplicateVote,
                format!(
                    "Member {} has already voted on discussion {}",
                    participant.member_id(),
                    participant.discussion_id()
                ),
            ));
        }
        tables.participants.insert(key, participant.clone());
        Ok(())
    }

    async fn find_vote(
        &self,
        discussion_id: DiscussionId,
        member_id: MemberId,
    ) -> Result<Option<VoteType>, DomainError> {
        Ok(self
            .lock()
            .participants
            .get(&(discussion_id.value(), member_id.value()))
            .map(|p| p.vote_type()))
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn insert(&self, reaction: &Reaction) -> Result<(), DomainError> {
        let key = (reaction.comment_id().value(), reaction.member_id().value());
        let mut tables = self.lock();
        if tables.reactions.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::DuplicateReaction,
                format!(
                    "Member {} has already reacted to comment {}",
                    reaction.member_id(),
                    reaction.comment_id()
                ),
            ));
        }
        tables.reactions.insert(key, reaction.clone());
        Ok(())
    }

    async fn find_reaction(
        &self,
        comment_id: CommentId,
        member_id: MemberId,
    ) -> Result<Option<ReactionKind>, DomainError> {
        Ok(self
            .lock()
            .reactions
            .get(&(comment_id.value(), member_id.value()))
            .map(|r| r.kind()))
    }
}
