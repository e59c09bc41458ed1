//! ApplyAnalysisHandler - persists an analysis verdict and closes the debate.
//!
//! Used by the close trigger once analysis succeeds, and available on its
//! own for operator-driven retries.

use std::sync::Arc;

use crate::domain::discussion::{
    AnalysisVerdict, DiscussionClosed, DiscussionError, DiscussionStatus,
};
use crate::domain::foundation::{DiscussionId, EventId, SerializableDomainEvent, Timestamp};
use crate::ports::{DiscussionRepository, EventPublisher};

/// Handler applying an analysis verdict: Analyzing -> Closed.
pub struct ApplyAnalysisHandler {
    repository: Arc<dyn DiscussionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ApplyAnalysisHandler {
    pub fn new(
        repository: Arc<dyn DiscussionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        discussion_id: DiscussionId,
        verdict: AnalysisVerdict,
    ) -> Result<(), DiscussionError> {
        let discussion = self
            .repository
            .find_by_id(discussion_id)
            .await?
            .ok_or_else(|| DiscussionError::not_found(discussion_id))?;
        if discussion.status() != DiscussionStatus::Analyzing {
            return Err(DiscussionError::invalid_state(discussion.status()));
        }

        let closed_at = Timestamp::now();
        self.repository
            .apply_analysis(discussion_id, &verdict, closed_at)
            .await?;

        let event = DiscussionClosed {
            event_id: EventId::new(),
            discussion_id,
            verdict: verdict.verdict,
            agree_percent: verdict.agree_percent,
            closed_at,
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        tracing::info!(discussion_id = %discussion_id, "analysis verdict applied, debate closed");
        Ok(())
    }
}
