//! RegisterDiscussionHandler - command handler for scheduling a debate.

use std::sync::Arc;

use crate::domain::discussion::{
    BookRef, DebatePolicy, Discussion, DiscussionError, DiscussionRegistered,
};
use crate::domain::foundation::{
    CommandMetadata, DomainError, EventId, SerializableDomainEvent, Timestamp,
};
use crate::ports::{
    BookCatalog, DiscussionRepository, EventPublisher, TimerKey, TriggerScheduler,
};

/// Command to register a new debate.
#[derive(Debug, Clone)]
pub struct RegisterDiscussionCommand {
    pub isbn: String,
    pub title: String,
    pub content: String,
    pub start_date: Timestamp,
}

/// Result of successful registration.
#[derive(Debug, Clone)]
pub struct RegisterDiscussionResult {
    pub discussion: Discussion,
    pub event: DiscussionRegistered,
}

/// Handler for registering debates.
pub struct RegisterDiscussionHandler {
    repository: Arc<dyn DiscussionRepository>,
    catalog: Arc<dyn BookCatalog>,
    scheduler: Arc<dyn TriggerScheduler>,
    event_publisher: Arc<dyn EventPublisher>,
    policy: DebatePolicy,
}

impl RegisterDiscussionHandler {
    pub fn new(
        repository: Arc<dyn DiscussionRepository>,
        catalog: Arc<dyn BookCatalog>,
        scheduler: Arc<dyn TriggerScheduler>,
        event_publisher: Arc<dyn EventPublisher>,
        policy: DebatePolicy,
    ) -> Self {
        Self {
            repository,
            catalog,
            scheduler,
            event_publisher,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterDiscussionCommand,
        metadata: CommandMetadata,
    ) -> Result<RegisterDiscussionResult, DiscussionError> {
        // 1. Resolve the book from the catalog
        let book = self
            .catalog
            .find_by_isbn(&cmd.isbn)
            .await?
            .ok_or_else(|| DiscussionError::book_not_found(cmd.isbn.clone()))?;
        let book = BookRef::new(book.isbn, book.title, book.cover_url)
            .map_err(DomainError::from)?;

        // 2. Build the aggregate (validates window and text)
        let id = self.repository.next_id().await?;
        let now = Timestamp::now();
        let mut discussion = Discussion::register(
            id,
            metadata.member_id,
            book,
            cmd.title,
            cmd.content,
            cmd.start_date,
            &self.policy,
            now,
        )?;

        // 3. Persist, then arm both lifecycle timers
        self.repository.save(&discussion).await?;

        let open_timer = self
            .scheduler
            .register_once(TimerKey::OpenDiscussion(id), discussion.start_date())
            .await?;
        let close_timer = self
            .scheduler
            .register_once(TimerKey::CloseDiscussion(id), discussion.ends_at())
            .await?;
        discussion.set_timers(open_timer, close_timer);
        self.repository.update(&discussion).await?;

        // 4. Publish the registration event
        let event = DiscussionRegistered {
            event_id: EventId::new(),
            discussion_id: id,
            author_id: metadata.member_id,
            isbn: discussion.book().isbn().to_string(),
            title: discussion.title().to_string(),
            start_date: discussion.start_date(),
            registered_at: discussion.created_at(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_member_id(metadata.member_id.to_string());
        self.event_publisher.publish(envelope).await?;

        tracing::info!(discussion_id = %id, start_date = %discussion.start_date(), "debate registered");
        Ok(RegisterDiscussionResult { discussion, event })
    }
}
