//! Trigger scheduler port.
//!
//! Debate lifecycle transitions are time-driven: a timer opens the
//! debate at its start date and another closes it at the end of the
//! debate window. The scheduler delivers at-least-once; the lifecycle
//! handlers are compare-and-set idempotent, so duplicate or late fires
//! are absorbed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DiscussionId, DomainError, TimerId, Timestamp};

/// What a timer should do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "discussion_id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerKey {
    /// Move the discussion Waiting -> Ongoing.
    OpenDiscussion(DiscussionId),
    /// Move the discussion Ongoing -> Analyzing and run analysis.
    CloseDiscussion(DiscussionId),
}

impl TimerKey {
    pub fn discussion_id(&self) -> DiscussionId {
        match self {
            TimerKey::OpenDiscussion(id) | TimerKey::CloseDiscussion(id) => *id,
        }
    }
}

/// Port for registering one-shot timers.
#[async_trait]
pub trait TriggerScheduler: Send + Sync {
    /// Register a one-shot timer firing at `fire_at`.
    ///
    /// A `fire_at` in the past fires immediately.
    ///
    /// # Errors
    ///
    /// - `SchedulerError` when the timer cannot be registered
    async fn register_once(&self, key: TimerKey, fire_at: Timestamp)
        -> Result<TimerId, DomainError>;

    /// Cancel a registered timer.
    ///
    /// Cancelling an unknown or already-fired timer is a no-op.
    async fn cancel(&self, timer_id: TimerId) -> Result<(), DomainError>;

    /// Move a registered timer to a new fire time.
    ///
    /// Equivalent to cancel + register with the same key; returns the
    /// replacement timer id.
    ///
    /// # Errors
    ///
    /// - `SchedulerError` if the timer is unknown or already fired
    async fn reschedule(
        &self,
        timer_id: TimerId,
        fire_at: Timestamp,
    ) -> Result<TimerId, DomainError>;
}

/// Receiver for fired timers.
///
/// The scheduler adapter dispatches each fire through this trait; the
/// application wires it to the open/close lifecycle handlers.
#[async_trait]
pub trait TriggerSink: Send + Sync {
    /// Handle one fired timer.
    ///
    /// Errors are logged by the scheduler, never retried automatically.
    async fn on_fire(&self, key: TimerKey) -> Result<(), DomainError>;
}
