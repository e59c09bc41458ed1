//! ListCommentsHandler - flattened thread view with cursor paging.

use std::sync::Arc;

use crate::domain::comment::{flatten_thread, page_thread, CommentError, ThreadEntry};
use crate::domain::foundation::{CursorPage, DiscussionId, ScrollQuery};
use crate::ports::{CommentReader, DiscussionRepository};

/// Query handler for a debate's comment thread.
///
/// Ordering, flattened positions and top-comment selection are computed
/// by the thread engine on every read; the page is then cut out of the
/// flattened order by cursor.
pub struct ListCommentsHandler {
    comment_reader: Arc<dyn CommentReader>,
    discussion_repository: Arc<dyn DiscussionRepository>,
}

impl ListCommentsHandler {
    pub fn new(
        comment_reader: Arc<dyn CommentReader>,
        discussion_repository: Arc<dyn DiscussionRepository>,
    ) -> Self {
        Self {
            comment_reader,
            discussion_repository,
        }
    }

    pub async fn handle(
        &self,
        discussion_id: DiscussionId,
        query: ScrollQuery,
    ) -> Result<CursorPage<ThreadEntry>, CommentError> {
        if self
            .discussion_repository
            .find_by_id(discussion_id)
            .await?
            .is_none()
        {
            return Err(CommentError::discussion_not_found(discussion_id));
        }

        let comments = self.comment_reader.find_by_discussion(discussion_id).await?;
        let entries = flatten_thread(comments);
        Ok(page_thread(entries, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::MockBookCatalog;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::scheduler::MockTriggerScheduler;
    use crate::application::handlers::comment::{PostCommentCommand, PostCommentHandler};
    use crate::application::handlers::discussion::{
        RegisterDiscussionCommand, RegisterDiscussionHandler,
    };
    use crate::domain::discussion::{DebatePolicy, DiscussionStatus};
    use crate::domain::foundation::{CommandMetadata, CommentId, MemberId, Timestamp};
    use crate::domain::vote::{ReactionKind, VoteType};
    use crate::ports::CommentRepository;

    const ISBN: &str = "9788932917245";

    struct Fixture {
        store: Arc<InMemoryStore>,
        handler: ListCommentsHandler,
        discussion_id: DiscussionId,
    }

    async fn fixture() -> Fixture {
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
        let discussion_id = result.discussion.id();
        store
            .transition_status(
                discussion_id,
                DiscussionStatus::Waiting,
                DiscussionStatus::Ongoing,
            )
            .await
            .unwrap();

        Fixture {
            handler: ListCommentsHandler::new(store.clone(), store.clone()),
            store,
            discussion_id,
        }
    }

    async fn post(fx: &Fixture, member: i64, parent: Option<CommentId>, text: &str) -> CommentId {
        let handler = PostCommentHandler::new(fx.store.clone(), fx.store.clone());
        handler
            .handle(
                PostCommentCommand {
                    discussion_id: fx.discussion_id,
                    parent_id: parent,
                    vote_type: VoteType::Agree,
                    content: text.to_string(),
                },
                CommandMetadata::new(MemberId::new(member)),
            )
            .await
            .unwrap()
            .id()
    }

    #[tokio::test]
    async fn thread_orders_by_likes_and_keeps_replies_attached() {
        let fx = fixture().await;
        let quiet = post(&fx, 1, None, "quiet comment").await;
        let popular = post(&fx, 2, None, "popular comment").await;
        let reply = post(&fx, 3, Some(popular), "reply to popular").await;

        for _ in 0..2 {
            fx.store
                .increment_reaction_count(popular, ReactionKind::Like)
                .await
                .unwrap();
        }

        let page = fx
            .handler
            .handle(fx.discussion_id, ScrollQuery::from_start(10))
            .await
            .unwrap();
        let order: Vec<CommentId> = page.items.iter().map(|e| e.comment.id()).collect();
        assert_eq!(order, vec![popular, reply, quiet]);
        assert!(page.items[0].is_selected);
        assert!(!page.items[1].is_selected);
    }

    #[tokio::test]
    async fn cursor_continues_mid_thread() {
        let fx = fixture().await;
        for n in 0..5 {
            post(&fx, n, None, &format!("comment {}", n)).await;
        }

        let first = fx
            .handler
            .handle(fx.discussion_id, ScrollQuery::from_start(2))
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.has_next);

        let second = fx
            .handler
            .handle(fx.discussion_id, ScrollQuery::new(first.last_id, 3))
            .await
            .unwrap();
        assert_eq!(second.items.len(), 3);
        assert!(!second.has_next);
    }

    #[tokio::test]
    async fn empty_thread_yields_empty_page() {
        let fx = fixture().await;
        let page = fx
            .handler
            .handle(fx.discussion_id, ScrollQuery::from_start(10))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn unknown_discussion_is_rejected() {
        let fx = fixture().await;
        let result = fx
            .handler
            .handle(DiscussionId::new(404), ScrollQuery::from_start(10))
            .await;
        assert!(matches!(result, Err(CommentError::DiscussionNotFound(_))));
    }
}
