//! CastReactionHandler - one like/dislike per member per comment.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, CommentId, ErrorCode, Timestamp};
use crate::domain::vote::{Reaction, ReactionKind, VoteError};
use crate::ports::{CommentRepository, ReactionRepository};

/// Command to react to a comment.
#[derive(Debug, Clone)]
pub struct CastReactionCommand {
    pub comment_id: CommentId,
    pub kind: ReactionKind,
}

/// Handler for casting reactions.
pub struct CastReactionHandler {
    reaction_repository: Arc<dyn ReactionRepository>,
    comment_repository: Arc<dyn CommentRepository>,
}

impl CastReactionHandler {
    pub fn new(
        reaction_repository: Arc<dyn ReactionRepository>,
        comment_repository: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            reaction_repository,
            comment_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: CastReactionCommand,
        metadata: CommandMetadata,
    ) -> Result<(), VoteError> {
        let comment = self
            .comment_repository
            .find_by_id(cmd.comment_id)
            .await?
            .ok_or_else(|| VoteError::comment_not_found(cmd.comment_id))?;
        // Blocked comments read as absent to reactors.
        if comment.is_blocked() {
            return Err(VoteError::comment_not_found(cmd.comment_id));
        }

        let record = Reaction::new(
            cmd.comment_id,
            metadata.member_id,
            cmd.kind,
            Timestamp::now(),
        );
        self.reaction_repository
            .insert(&record)
            .await
            .map_err(|err| {
                if err.code == ErrorCode::DuplicateReaction {
                    VoteError::duplicate_reaction(cmd.comment_id, metadata.member_id)
                } else {
                    err.into()
                }
            })?;

        self.comment_repository
            .increment_reaction_count(cmd.comment_id, cmd.kind)
            .await?;

        tracing::info!(
            comment_id = %cmd.comment_id,
            member_id = %metadata.member_id,
            kind = %cmd.kind,
            "reaction cast"
        );
        Ok(())
    }
}
