//! In-memory comment repository and reader.

use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::foundation::{CommentId, DiscussionId, DomainError, ErrorCode, ViewStatus};
use crate::domain::vote::ReactionKind;
use crate::ports::{CommentReader, CommentRepository};

use super::InMemoryStore;

fn not_found(id: CommentId) -> DomainError {
    DomainError::new(
        ErrorCode::CommentNotFound,
        format!("Comment not found: {}", id),
    )
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn next_id(&self) -> Result<CommentId, DomainError> {
        Ok(CommentId::new(self.take_comment_id()))
    }

    async fn save(&self, comment: &Comment) -> Result<(), DomainError> {
        self.lock()
            .comments
            .insert(comment.id().value(), comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, DomainError> {
        Ok(self.lock().comments.get(&id.value()).cloned())
    }

    async fn increment_reaction_count(
        &self,
        id: CommentId,
        kind: ReactionKind,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let comment = tables
            .comments
            .get_mut(&id.value())
            .ok_or_else(|| not_found(id))?;
        comment.apply_reaction(kind);
        Ok(())
    }

    async fn set_view_status(
        &self,
        id: CommentId,
        view_status: ViewStatus,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let comment = tables
            .comments
            .get_mut(&id.value())
            .ok_or_else(|| not_found(id))?;
        comment.set_view_status(view_status);
        Ok(())
    }
}

#[async_trait]
impl CommentReader for InMemoryStore {
    async fn find_by_discussion(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .lock()
            .comments
            .values()
            .filter(|c| c.discussion_id() == discussion_id)
            .cloned()
            .collect())
    }

    async fn count_by_discussion(&self, discussion_id: DiscussionId) -> Result<u32, DomainError> {
        Ok(self
            .lock()
            .comments
            .values()
            .filter(|c| c.discussion_id() == discussion_id)
            .count() as u32)
    }
}
