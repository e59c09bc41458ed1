//! RecordViewHandler - relaxed view counting.

use std::sync::Arc;

use crate::domain::discussion::DiscussionError;
use crate::domain::foundation::DiscussionId;
use crate::ports::DiscussionRepository;

/// Handler counting one view of a debate.
///
/// The counter is relaxed: concurrent bumps interleave freely and there
/// is no status precondition.
pub struct RecordViewHandler {
    repository: Arc<dyn DiscussionRepository>,
}

impl RecordViewHandler {
    pub fn new(repository: Arc<dyn DiscussionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, discussion_id: DiscussionId) -> Result<(), DiscussionError> {
        self.repository.increment_views(discussion_id).await?;
        Ok(())
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
    use crate::domain::foundation::{CommandMetadata, MemberId, Timestamp};

    const ISBN: &str = "9788932917245";

    #[tokio::test]
    async fn each_call_bumps_the_counter() {
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

        let handler = RecordViewHandler::new(store.clone());
        handler.handle(id).await.unwrap();
        handler.handle(id).await.unwrap();
        handler.handle(id).await.unwrap();

        let saved = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(saved.views(), 3);
    }

    #[tokio::test]
    async fn unknown_discussion_surfaces_infrastructure_error() {
        let store = Arc::new(InMemoryStore::new());
        let handler = RecordViewHandler::new(store);
        let result = handler.handle(DiscussionId::new(404)).await;
        assert!(result.is_err());
    }
}
