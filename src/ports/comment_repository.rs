//! Comment repository port (write side).

use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::foundation::{CommentId, DomainError, ViewStatus};
use crate::domain::vote::ReactionKind;

/// Repository port for Comment persistence.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Reserve the next comment id.
    async fn next_id(&self) -> Result<CommentId, DomainError>;

    /// Save a new comment.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, comment: &Comment) -> Result<(), DomainError>;

    /// Find a comment by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, DomainError>;

    /// Increment the like or dislike counter by one.
    async fn increment_reaction_count(
        &self,
        id: CommentId,
        kind: ReactionKind,
    ) -> Result<(), DomainError>;

    /// Set the moderation visibility flag.
    async fn set_view_status(
        &self,
        id: CommentId,
        view_status: ViewStatus,
    ) -> Result<(), DomainError>;
}
