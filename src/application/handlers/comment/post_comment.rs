//! PostCommentHandler - writes a comment (or reply) to an ongoing debate.

use std::sync::Arc;

use crate::domain::comment::{Comment, CommentError};
use crate::domain::discussion::DiscussionStatus;
use crate::domain::foundation::{CommandMetadata, CommentId, DiscussionId, Timestamp};
use crate::domain::vote::VoteType;
use crate::ports::{CommentRepository, DiscussionRepository};

/// Command to post a comment.
#[derive(Debug, Clone)]
pub struct PostCommentCommand {
    pub discussion_id: DiscussionId,
    /// Present when replying to another comment.
    pub parent_id: Option<CommentId>,
    /// Side the author takes.
    pub vote_type: VoteType,
    pub content: String,
}

/// Handler for posting comments.
pub struct PostCommentHandler {
    comment_repository: Arc<dyn CommentRepository>,
    discussion_repository: Arc<dyn DiscussionRepository>,
}

impl PostCommentHandler {
    pub fn new(
        comment_repository: Arc<dyn CommentRepository>,
        discussion_repository: Arc<dyn DiscussionRepository>,
    ) -> Self {
        Self {
            comment_repository,
            discussion_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: PostCommentCommand,
        metadata: CommandMetadata,
    ) -> Result<Comment, CommentError> {
        // 1. The debate must exist and be Ongoing
        let discussion = self
            .discussion_repository
            .find_by_id(cmd.discussion_id)
            .await?
            .ok_or_else(|| CommentError::discussion_not_found(cmd.discussion_id))?;
        if discussion.status() != DiscussionStatus::Ongoing {
            return Err(CommentError::not_ongoing(discussion.status()));
        }

        // 2. A reply's parent must exist in the same debate
        if let Some(parent_id) = cmd.parent_id {
            let parent = self
                .comment_repository
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| CommentError::not_found(parent_id))?;
            if parent.discussion_id() != cmd.discussion_id {
                return Err(CommentError::not_found(parent_id));
            }
        }

        // 3. Build and persist
        let id = self.comment_repository.next_id().await?;
        let comment = Comment::new(
            id,
            cmd.discussion_id,
            metadata.member_id,
            cmd.parent_id,
            cmd.vote_type,
            cmd.content,
            Timestamp::now(),
        )?;
        self.comment_repository.save(&comment).await?;

        tracing::info!(
            discussion_id = %cmd.discussion_id,
            comment_id = %id,
            reply = comment.is_reply(),
            "comment posted"
        );
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::MockBookCatalog;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::scheduler::MockTriggerScheduler;
    use crate::application::handlers::discussion::{
        RegisterDiscussionCommand, RegisterDiscussionHandler,
    };
    use crate::domain::discussion::DebatePolicy;
    use crate::domain::foundation::MemberId;

    const ISBN: &str = "9788932917245";

    struct Fixture {
        store: Arc<InMemoryStore>,
        handler: PostCommentHandler,
    }

    async fn fixture_with_ongoing() -> (Fixture, DiscussionId) {
        let store = Arc::new(InMemoryStore::new());
        let register = RegisterDiscussionHandler::new(
            store.clone(),
            Arc::new(MockBookCatalog::new().with_book(ISBN, "The Vegetarian")),
            Arc::new(MockTriggerScheduler::new()),
            Arc::new(InMemoryEventBus::new()),
            DebatePolicy::default(),
        );
        let result = register
            .handle(
                RegisterDiscussionCommand {
                    isbn: ISBN.to_string(),
                    title: "Is the ending earned?".to_string(),
                    content: "Let's debate the final chapter.".to_string(),
                    start_date: Timestamp::now().plus_hours(48),
                },
                CommandMetadata::new(MemberId::new(10)),
            )
            .await
            .unwrap();
        let id = result.discussion.id();
        store
            .transition_status(id, DiscussionStatus::Waiting, DiscussionStatus::Ongoing)
            .await
            .unwrap();

        let handler = PostCommentHandler::new(store.clone(), store.clone());
        (Fixture { store, handler }, id)
    }

    fn command(discussion_id: DiscussionId, parent_id: Option<CommentId>) -> PostCommentCommand {
        PostCommentCommand {
            discussion_id,
            parent_id,
            vote_type: VoteType::Agree,
            content: "The prose carries the ending.".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_a_top_level_comment() {
        let (fx, id) = fixture_with_ongoing().await;

        let comment = fx
            .handler
            .handle(command(id, None), CommandMetadata::new(MemberId::new(5)))
            .await
            .unwrap();

        assert!(!comment.is_reply());
        assert_eq!(comment.author_id(), MemberId::new(5));
        let saved = CommentRepository::find_by_id(fx.store.as_ref(), comment.id())
            .await
            .unwrap();
        assert!(saved.is_some());
    }

    #[tokio::test]
    async fn posts_a_reply_under_an_existing_parent() {
        let (fx, id) = fixture_with_ongoing().await;

        let parent = fx
            .handler
            .handle(command(id, None), CommandMetadata::new(MemberId::new(5)))
            .await
            .unwrap();
        let reply = fx
            .handler
            .handle(
                command(id, Some(parent.id())),
                CommandMetadata::new(MemberId::new(6)),
            )
            .await
            .unwrap();

        assert_eq!(reply.parent_id(), Some(parent.id()));
    }

    #[tokio::test]
    async fn reply_to_unknown_parent_is_rejected() {
        let (fx, id) = fixture_with_ongoing().await;
        let result = fx
            .handler
            .handle(
                command(id, Some(CommentId::new(404))),
                CommandMetadata::new(MemberId::new(5)),
            )
            .await;
        assert!(matches!(result, Err(CommentError::NotFound(_))));
    }

    #[tokio::test]
    async fn reply_across_discussions_is_rejected() {
        let (fx, first) = fixture_with_ongoing().await;
        let parent = fx
            .handler
            .handle(command(first, None), CommandMetadata::new(MemberId::new(5)))
            .await
            .unwrap();

        // Second ongoing debate in the same store.
        let register = RegisterDiscussionHandler::new(
            fx.store.clone(),
            Arc::new(MockBookCatalog::new().with_book(ISBN, "The Vegetarian")),
            Arc::new(MockTriggerScheduler::new()),
            Arc::new(InMemoryEventBus::new()),
            DebatePolicy::default(),
        );
        let second = register
            .handle(
                RegisterDiscussionCommand {
                    isbn: ISBN.to_string(),
                    title: "Second debate".to_string(),
                    content: "Another angle.".to_string(),
                    start_date: Timestamp::now().plus_hours(48),
                },
                CommandMetadata::new(MemberId::new(10)),
            )
            .await
            .unwrap();
        let second_id = second.discussion.id();
        fx.store
            .transition_status(second_id, DiscussionStatus::Waiting, DiscussionStatus::Ongoing)
            .await
            .unwrap();

        let result = fx
            .handler
            .handle(
                command(second_id, Some(parent.id())),
                CommandMetadata::new(MemberId::new(6)),
            )
            .await;
        assert!(matches!(result, Err(CommentError::NotFound(_))));
    }

    #[tokio::test]
    async fn comments_rejected_unless_ongoing() {
        let (fx, id) = fixture_with_ongoing().await;
        fx.store
            .transition_status(id, DiscussionStatus::Ongoing, DiscussionStatus::Analyzing)
            .await
            .unwrap();

        let result = fx
            .handler
            .handle(command(id, None), CommandMetadata::new(MemberId::new(5)))
            .await;
        assert!(matches!(
            result,
            Err(CommentError::NotOngoing {
                current: DiscussionStatus::Analyzing
            })
        ));
    }

    #[tokio::test]
    async fn empty_content_is_rejected() {
        let (fx, id) = fixture_with_ongoing().await;
        let cmd = PostCommentCommand {
            content: "   ".to_string(),
            ..command(id, None)
        };
        let result = fx
            .handler
            .handle(cmd, CommandMetadata::new(MemberId::new(5)))
            .await;
        assert!(matches!(result, Err(CommentError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn unknown_discussion_is_rejected() {
        let (fx, _) = fixture_with_ongoing().await;
        let result = fx
            .handler
            .handle(
                command(DiscussionId::new(404), None),
                CommandMetadata::new(MemberId::new(5)),
            )
            .await;
        assert!(matches!(result, Err(CommentError::DiscussionNotFound(_))));
    }
}
