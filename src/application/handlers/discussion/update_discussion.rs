//! UpdateDiscussionHandler - author edits before the debate opens.

use std::sync::Arc;

use crate::domain::discussion::{DebatePolicy, Discussion, DiscussionError};
use crate::domain::foundation::{CommandMetadata, DiscussionId, Timestamp};
use crate::ports::{DiscussionRepository, TimerKey, TriggerScheduler};

/// Command to update a Waiting debate.
#[derive(Debug, Clone)]
pub struct UpdateDiscussionCommand {
    pub discussion_id: DiscussionId,
    pub title: String,
    pub content: String,
    pub start_date: Timestamp,
}

/// Handler for updating debates.
///
/// Author-only and Waiting-only. The scheduling window is re-validated
/// against the current clock, and both lifecycle timers are cancelled
/// and re-registered at the new times.
pub struct UpdateDiscussionHandler {
    repository: Arc<dyn DiscussionRepository>,
    scheduler: Arc<dyn TriggerScheduler>,
    policy: DebatePolicy,
}

impl UpdateDiscussionHandler {
    pub fn new(
        repository: Arc<dyn DiscussionRepository>,
        scheduler: Arc<dyn TriggerScheduler>,
        policy: DebatePolicy,
    ) -> Self {
        Self {
            repository,
            scheduler,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDiscussionCommand,
        metadata: CommandMetadata,
    ) -> Result<Discussion, DiscussionError> {
        let mut discussion = self
            .repository
            .find_by_id(cmd.discussion_id)
            .await?
            .ok_or_else(|| DiscussionError::not_found(cmd.discussion_id))?;

        discussion.authorize_edit(metadata.member_id)?;
        discussion.update(
            cmd.title,
            cmd.content,
            cmd.start_date,
            &self.policy,
            Timestamp::now(),
        )?;

        // Re-arm both timers at the new times.
        if let Some(timer) = discussion.open_timer() {
            self.scheduler.cancel(timer).await?;
        }
        if let Some(timer) = discussion.close_timer() {
            self.scheduler.cancel(timer).await?;
        }
        let open_timer = self
            .scheduler
            .register_once(
                TimerKey::OpenDiscussion(cmd.discussion_id),
                discussion.start_date(),
            )
            .await?;
        let close_timer = self
            .scheduler
            .register_once(
                TimerKey::CloseDiscussion(cmd.discussion_id),
                discussion.ends_at(),
            )
            .await?;
        discussion.set_timers(open_timer, close_timer);

        self.repository.update(&discussion).await?;
        tracing::info!(discussion_id = %cmd.discussion_id, "debate rescheduled");
        Ok(discussion)
    }
}
