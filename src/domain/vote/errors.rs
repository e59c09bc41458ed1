//! Vote and reaction error types.

use crate::domain::foundation::{
    CommentId, DiscussionId, DomainError, ErrorCode, MemberId,
};
use crate::domain::discussion::DiscussionStatus;

/// Errors raised when casting votes or reactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    /// Discussion was not found.
    DiscussionNotFound(DiscussionId),
    /// Comment was not found.
    CommentNotFound(CommentId),
    /// Member already voted on this discussion.
    DuplicateVote {
        discussion_id: DiscussionId,
        member_id: MemberId,
    },
    /// Member already reacted to this comment.
    DuplicateReaction {
        comment_id: CommentId,
        member_id: MemberId,
    },
    /// Votes are only accepted while the debate is Ongoing.
    NotOngoing { current: DiscussionStatus },
    /// Infrastructure error.
    Infrastructure(String),
}

impl VoteError {
    pub fn discussion_not_found(id: DiscussionId) -> Self {
        VoteError::DiscussionNotFound(id)
    }

    pub fn comment_not_found(id: CommentId) -> Self {
        VoteError::CommentNotFound(id)
    }

    pub fn duplicate_vote(discussion_id: DiscussionId, member_id: MemberId) -> Self {
        VoteError::DuplicateVote {
            discussion_id,
            member_id,
        }
    }

    pub fn duplicate_reaction(comment_id: CommentId, member_id: MemberId) -> Self {
        VoteError::DuplicateReaction {
            comment_id,
            member_id,
        }
    }

    pub fn not_ongoing(current: DiscussionStatus) -> Self {
        VoteError::NotOngoing { current }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        VoteError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            VoteError::DiscussionNotFound(_) => ErrorCode::DiscussionNotFound,
            VoteError::CommentNotFound(_) => ErrorCode::CommentNotFound,
            VoteError::DuplicateVote { .. } => ErrorCode::DuplicateVote,
            VoteError::DuplicateReaction { .. } => ErrorCode::DuplicateReaction,
            VoteError::NotOngoing { .. } => ErrorCode::InvalidStateTransition,
            VoteError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            VoteError::DiscussionNotFound(id) => format!("Discussion not found: {}", id),
            VoteError::CommentNotFound(id) => format!("Comment not found: {}", id),
            VoteError::DuplicateVote { member_id, .. } => {
                format!("Member {} has already voted on this discussion", member_id)
            }
            VoteError::DuplicateReaction { member_id, .. } => {
                format!("Member {} has already reacted to this comment", member_id)
            }
            VoteError::NotOngoing { current } => {
                format!("Votes are only accepted while ONGOING, discussion is {}", current)
            }
            VoteError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for VoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for VoteError {}

impl From<DomainError> for VoteError {
    fn from(err: DomainError) -> Self {
        VoteError::Infrastructure(err.to_string())
    }
}
