//! OpenDiscussionHandler - trigger handler for the open timer.
//!
//! The scheduler delivers at-least-once, so this handler is idempotent:
//! the Waiting -> Ongoing move is a compare-and-set, and a lost race
//! (duplicate or late fire) is absorbed as a no-op.

use std::sync::Arc;

use crate::domain::discussion::{DiscussionError, DiscussionOpened, DiscussionStatus};
use crate::domain::foundation::{DiscussionId, EventId, SerializableDomainEvent, Timestamp};
use crate::ports::{DiscussionRepository, EventPublisher};

/// Handler for the debate open trigger.
pub struct OpenDiscussionHandler {
    repository: Arc<dyn DiscussionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl OpenDiscussionHandler {
    pub fn new(
        repository: Arc<dyn DiscussionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    /// Fires the open transition. Returns whether this fire won the swap.
    pub async fn handle(&self, discussion_id: DiscussionId) -> Result<bool, DiscussionError> {
        let discussion = self
            .repository
            .find_by_id(discussion_id)
            .await?
            .ok_or_else(|| DiscussionError::not_found(discussion_id))?;

        let fired = self
            .repository
            .transition_status(
                discussion_id,
                DiscussionStatus::Waiting,
                DiscussionStatus::Ongoing,
            )
            .await?;
        if !fired {
            tracing::debug!(
                discussion_id = %discussion_id,
                status = %discussion.status(),
                "open trigger absorbed, discussion already transitioned"
            );
            return Ok(false);
        }

        let event = DiscussionOpened {
            event_id: EventId::new(),
            discussion_id,
            ends_at: discussion.ends_at(),
            opened_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        tracing::info!(discussion_id = %discussion_id, ends_at = %discussion.ends_at(), "debate opened");
        Ok(true)
    }
}
