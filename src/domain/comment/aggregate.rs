//! Comment entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, DiscussionId, MemberId, Timestamp, ViewStatus};
use crate::domain::vote::{ReactionKind, VoteType};

use super::CommentError;

/// Maximum length for comment content.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// A comment on a debate, optionally replying to another comment.
///
/// Comments are written only while the debate is Ongoing and are never
/// hard-deleted; moderation blocks them instead. Selection into the top
/// three is computed at read time and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    discussion_id: DiscussionId,
    author_id: MemberId,

    /// Parent comment when this is a reply; must belong to the same
    /// discussion.
    parent_id: Option<CommentId>,

    /// Side the author took in the debate.
    vote_type: VoteType,

    content: String,

    /// Reaction counters, maintained by the reaction ledger.
    like_count: u32,
    dislike_count: u32,

    view_status: ViewStatus,
    created_at: Timestamp,
}

impl Comment {
    /// Creates a new comment.
    ///
    /// The caller is responsible for checking the discussion is Ongoing
    /// and that any parent belongs to the same discussion.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty or too long
    pub fn new(
        id: CommentId,
        discussion_id: DiscussionId,
        author_id: MemberId,
        parent_id: Option<CommentId>,
        vote_type: VoteType,
        content: String,
        created_at: Timestamp,
    ) -> Result<Self, CommentError> {
        if content.trim().is_empty() {
            return Err(CommentError::validation("content", "cannot be empty"));
        }
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(CommentError::validation(
                "content",
                format!("must be at most {} characters", MAX_COMMENT_LENGTH),
            ));
        }

        Ok(Self {
            id,
            discussion_id,
            author_id,
            parent_id,
            vote_type,
            content,
            like_count: 0,
            dislike_count: 0,
            view_status: ViewStatus::Normal,
            created_at,
        })
    }

    /// Reconstitute a comment from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CommentId,
        discussion_id: DiscussionId,
        author_id: MemberId,
        parent_id: Option<CommentId>,
        vote_type: VoteType,
        content: String,
        like_count: u32,
        dislike_count: u32,
        view_status: ViewStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            discussion_id,
            author_id,
            parent_id,
            vote_type,
            content,
            like_count,
            dislike_count,
            view_status,
            created_at,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn discussion_id(&self) -> DiscussionId {
        self.discussion_id
    }

    pub fn author_id(&self) -> MemberId {
        self.author_id
    }

    pub fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    pub fn vote_type(&self) -> VoteType {
        self.vote_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn like_count(&self) -> u32 {
        self.like_count
    }

    pub fn dislike_count(&self) -> u32 {
        self.dislike_count
    }

    pub fn view_status(&self) -> ViewStatus {
        self.view_status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn is_blocked(&self) -> bool {
        self.view_status == ViewStatus::Blocked
    }

    /// Applies one reaction to the counters.
    pub fn apply_reaction(&mut self, kind: ReactionKind) {
        match kind {
            ReactionKind::Like => self.like_count += 1,
            ReactionKind::Dislike => self.dislike_count += 1,
        }
    }

    /// Sets the moderation visibility flag.
    pub fn set_view_status(&mut self, view_status: ViewStatus) {
        self.view_status = view_status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: i64) -> Comment {
        Comment::new(
            CommentId::new(id),
            DiscussionId::new(1),
            MemberId::new(5),
            None,
            VoteType::Agree,
            "The prose carries the ending.".to_string(),
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_comment_starts_normal_with_zero_reactions() {
        let comment = comment(1);
        assert_eq!(comment.like_count(), 0);
        assert_eq!(comment.dislike_count(), 0);
        assert_eq!(comment.view_status(), ViewStatus::Normal);
        assert!(!comment.is_reply());
    }

    #[test]
    fn new_rejects_empty_content() {
        let result = Comment::new(
            CommentId::new(1),
            DiscussionId::new(1),
            MemberId::new(5),
            None,
            VoteType::Agree,
            "   ".to_string(),
            Timestamp::now(),
        );
        assert!(matches!(result, Err(CommentError::ValidationFailed { .. })));
    }

    #[test]
    fn new_rejects_oversized_content() {
        let result = Comment::new(
            CommentId::new(1),
            DiscussionId::new(1),
            MemberId::new(5),
            None,
            VoteType::Agree,
            "a".repeat(MAX_COMMENT_LENGTH + 1),
            Timestamp::now(),
        );
        assert!(matches!(result, Err(CommentError::ValidationFailed { .. })));
    }

    #[test]
    fn apply_reaction_updates_counters() {
        let mut comment = comment(1);
        comment.apply_reaction(ReactionKind::Like);
        comment.apply_reaction(ReactionKind::Like);
        comment.apply_reaction(ReactionKind::Dislike);
        assert_eq!(comment.like_count(), 2);
        assert_eq!(comment.dislike_count(), 1);
    }

    #[test]
    fn blocking_flips_visibility() {
        let mut comment = comment(1);
        comment.set_view_status(ViewStatus::Blocked);
        assert!(comment.is_blocked());
    }
}
