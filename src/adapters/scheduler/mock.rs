//! Mock trigger scheduler for testing.
//!
//! Records registrations and cancellations without spawning tasks;
//! tests fire timers by driving the handlers (or a `TriggerSink`)
//! directly.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, TimerId, Timestamp};
use crate::ports::{TimerKey, TriggerScheduler};

/// A recorded registration.
#[derive(Debug, Clone)]
pub struct RegisteredTimer {
    pub timer_id: TimerId,
    pub key: TimerKey,
    pub fire_at: Timestamp,
}

/// Recording scheduler that never fires on its own.
pub struct MockTriggerScheduler {
    registered: Mutex<Vec<RegisteredTimer>>,
    cancelled: Mutex<Vec<TimerId>>,
    fail_register: bool,
}

impl MockTriggerScheduler {
    pub fn new() -> Self {
        Self {
            registered: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
            fail_register: false,
        }
    }

    /// A scheduler whose registrations always fail.
    pub fn failing() -> Self {
        Self {
            registered: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
            fail_register: true,
        }
    }

    /// All registrations recorded so far.
    pub fn registered(&self) -> Vec<RegisteredTimer> {
        self.registered.lock().unwrap().clone()
    }

    /// All cancellations recorded so far.
    pub fn cancelled(&self) -> Vec<TimerId> {
        self.cancelled.lock().unwrap().clone()
    }

    /// Registrations for a given key.
    pub fn registrations_for(&self, key: TimerKey) -> Vec<RegisteredTimer> {
        self.registered()
            .into_iter()
            .filter(|r| r.key == key)
            .collect()
    }
}

impl Default for MockTriggerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TriggerScheduler for MockTriggerScheduler {
    async fn register_once(
        &self,
        key: TimerKey,
        fire_at: Timestamp,
    ) -> Result<TimerId, DomainError> {
        if self.fail_register {
            return Err(DomainError::new(
                ErrorCode::SchedulerError,
                "Simulated registration failure",
            ));
        }
        let timer_id = TimerId::new();
        self.registered.lock().unwrap().push(RegisteredTimer {
            timer_id,
            key,
            fire_at,
        });
        Ok(timer_id)
    }

    async fn cancel(&self, timer_id: TimerId) -> Result<(), DomainError> {
        self.cancelled.lock().unwrap().push(timer_id);
        Ok(())
    }

    async fn reschedule(
        &self,
        timer_id: TimerId,
        fire_at: Timestamp,
    ) -> Result<TimerId, DomainError> {
        let key = self
            .registered
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.timer_id == timer_id)
            .map(|r| r.key)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SchedulerError,
                    format!("Timer not found: {}", timer_id),
                )
            })?;
        self.cancel(timer_id).await?;
        self.register_once(key, fire_at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DiscussionId;

    #[tokio::test]
    async fn records_registrations_and_cancellations() {
        let scheduler = MockTriggerScheduler::new();
        let key = TimerKey::OpenDiscussion(DiscussionId::new(1));

        let timer_id = scheduler
            .register_once(key, Timestamp::now())
            .await
            .unwrap();
        scheduler.cancel(timer_id).await.unwrap();

        assert_eq!(scheduler.registrations_for(key).len(), 1);
        assert_eq!(scheduler.cancelled(), vec![timer_id]);
    }

    #[tokio::test]
    async fn failing_scheduler_rejects_registration() {
        let scheduler = MockTriggerScheduler::failing();
        let err = scheduler
            .register_once(
                TimerKey::CloseDiscussion(DiscussionId::new(1)),
                Timestamp::now(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SchedulerError);
    }
}
