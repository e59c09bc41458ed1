//! Dispatch of fired timers to the lifecycle handlers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{TimerKey, TriggerSink};

use super::handlers::discussion::{CloseDiscussionHandler, OpenDiscussionHandler};

/// Routes fired timers to the open/close lifecycle handlers.
///
/// Both handlers are idempotent, so the at-least-once scheduler can
/// deliver duplicates or fire late without harm.
pub struct LifecycleTriggerSink {
    open_handler: Arc<OpenDiscussionHandler>,
    close_handler: Arc<CloseDiscussionHandler>,
}

impl LifecycleTriggerSink {
    pub fn new(
        open_handler: Arc<OpenDiscussionHandler>,
        close_handler: Arc<CloseDiscussionHandler>,
    ) -> Self {
        Self {
            open_handler,
            close_handler,
        }
    }
}

#[async_trait]
impl TriggerSink for LifecycleTriggerSink {
    async fn on_fire(&self, key: TimerKey) -> Result<(), DomainError> {
        match key {
            TimerKey::OpenDiscussion(id) => {
                self.open_handler.handle(id).await.map_err(|err| {
                    DomainError::new(ErrorCode::SchedulerError, err.to_string())
                })?;
            }
            TimerKey::CloseDiscussion(id) => {
                self.close_handler.handle(id).await.map_err(|err| {
                    DomainError::new(ErrorCode::SchedulerError, err.to_string())
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAnalysisProvider;
    use crate::adapters::catalog::MockBookCatalog;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::scheduler::MockTriggerScheduler;
    use crate::application::handlers::discussion::{
        RegisterDiscussionCommand, RegisterDiscussionHandler, DEFAULT_MAX_ANALYSIS_ATTEMPTS,
    };
    use crate::domain::discussion::{DebatePolicy, DiscussionStatus};
    use crate::domain::foundation::{CommandMetadata, MemberId, Timestamp};
    use crate::ports::DiscussionRepository;

    const ISBN: &str = "9788932917245";

    #[tokio::test]
    async fn sink_walks_a_debate_through_its_lifecycle() {
        let store = Arc::new(InMemoryStore::new());
        let publisher = Arc::new(InMemoryEventBus::new());

        let register = RegisterDiscussionHandler::new(
            store.clone(),
            Arc::new(MockBookCatalog::new().with_book(ISBN, "The Vegetarian")),
            Arc::new(MockTriggerScheduler::new()),
            publisher.clone(),
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

        let sink = LifecycleTriggerSink::new(
            Arc::new(OpenDiscussionHandler::new(store.clone(), publisher.clone())),
            Arc::new(CloseDiscussionHandler::new(
                store.clone(),
                store.clone(),
                Arc::new(MockAnalysisProvider::new().with_verdict("Agree carried it.", true, 60)),
                publisher.clone(),
                DEFAULT_MAX_ANALYSIS_ATTEMPTS,
            )),
        );

        sink.on_fire(TimerKey::OpenDiscussion(id)).await.unwrap();
        let saved = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(saved.status(), DiscussionStatus::Ongoing);

        sink.on_fire(TimerKey::CloseDiscussion(id)).await.unwrap();
        let saved = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(saved.status(), DiscussionStatus::Closed);

        // Duplicate fires are absorbed by the handlers.
        sink.on_fire(TimerKey::OpenDiscussion(id)).await.unwrap();
        sink.on_fire(TimerKey::CloseDiscussion(id)).await.unwrap();
        assert_eq!(publisher.events_of_type("discussion.opened").len(), 1);
        assert_eq!(publisher.events_of_type("discussion.closed").len(), 1);
    }
}
