//! CastVoteHandler - one agree/disagree vote per member per debate.

use std::sync::Arc;

use crate::domain::discussion::DiscussionStatus;
use crate::domain::foundation::{CommandMetadata, DiscussionId, ErrorCode, Timestamp};
use crate::domain::vote::{Participant, VoteError, VoteType};
use crate::ports::{DiscussionRepository, ParticipantRepository};

/// Command to cast a vote on an ongoing debate.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub discussion_id: DiscussionId,
    pub vote_type: VoteType,
}

/// Handler for casting votes.
///
/// The ledger insert enforces uniqueness per (discussion, member); the
/// counter bump happens only after the insert succeeds, so a duplicate
/// never double-counts.
pub struct CastVoteHandler {
    participant_repository: Arc<dyn ParticipantRepository>,
    discussion_repository: Arc<dyn DiscussionRepository>,
}

impl CastVoteHandler {
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        discussion_repository: Arc<dyn DiscussionRepository>,
    ) -> Self {
        Self {
            participant_repository,
            discussion_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: CastVoteCommand,
        metadata: CommandMetadata,
    ) -> Result<(), VoteError> {
        let discussion = self
            .discussion_repository
            .find_by_id(cmd.discussion_id)
            .await?
            .ok_or_else(|| VoteError::discussion_not_found(cmd.discussion_id))?;
        if discussion.status() != DiscussionStatus::Ongoing {
            return Err(VoteError::not_ongoing(discussion.status()));
        }

        let record = Participant::new(
            cmd.discussion_id,
            metadata.member_id,
            cmd.vote_type,
            Timestamp::now(),
        );
        self.participant_repository
            .insert(&record)
            .await
            .map_err(|err| {
                if err.code == ErrorCode::DuplicateVote {
                    VoteError::duplicate_vote(cmd.discussion_id, metadata.member_id)
                } else {
                    err.into()
                }
            })?;

        self.discussion_repository
            .increment_vote_count(cmd.discussion_id, cmd.vote_type)
            .await?;

        tracing::info!(
            discussion_id = %cmd.discussion_id,
            member_id = %metadata.member_id,
            side = %cmd.vote_type,
            "vote cast"
        );
        Ok(())
    }
}
