//! Tokio-based one-shot trigger scheduler.
//!
//! Each registered timer is a spawned task sleeping until its fire time,
//! then dispatching through the `TriggerSink`. Delivery is
//! at-least-once in spirit: a fire time in the past fires immediately,
//! and the lifecycle handlers absorb duplicates via compare-and-set.
//!
//! Timers live only as long as the process; on restart, pending
//! discussions must be re-registered at startup (see `main`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, TimerId, Timestamp};
use crate::ports::{TimerKey, TriggerScheduler, TriggerSink};

struct TimerEntry {
    key: TimerKey,
    handle: tokio::task::AbortHandle,
}

/// One-shot timer scheduler backed by `tokio::time::sleep`.
pub struct TokioTriggerScheduler {
    sink: Arc<dyn TriggerSink>,
    timers: Arc<Mutex<HashMap<TimerId, TimerEntry>>>,
}

impl TokioTriggerScheduler {
    pub fn new(sink: Arc<dyn TriggerSink>) -> Self {
        Self {
            sink,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of timers currently pending.
    pub fn pending(&self) -> usize {
        self.timers.lock().expect("scheduler lock poisoned").len()
    }

    fn delay_until(fire_at: Timestamp) -> Duration {
        let now = Timestamp::now();
        if fire_at.is_before(&now) {
            Duration::ZERO
        } else {
            fire_at
                .duration_since(&now)
                .to_std()
                .unwrap_or(Duration::ZERO)
        }
    }
}

#[async_trait]
impl TriggerScheduler for TokioTriggerScheduler {
    async fn register_once(
        &self,
        key: TimerKey,
        fire_at: Timestamp,
    ) -> Result<TimerId, DomainError> {
        let timer_id = TimerId::new();
        let delay = Self::delay_until(fire_at);
        let sink = Arc::clone(&self.sink);
        let timers_of_task = Arc::clone(&self.timers);

        // The entry must be in the map before the task can fire: a
        // zero-delay timer on a multi-threaded runtime would otherwise
        // remove nothing and leave a stale entry behind. Holding the lock
        // across spawn+insert makes the task's remove wait for the insert.
        {
            let mut timers = self.timers.lock().expect("scheduler lock poisoned");
            let task = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                timers_of_task
                    .lock()
                    .expect("scheduler lock poisoned")
                    .remove(&timer_id);
                if let Err(err) = sink.on_fire(key).await {
                    tracing::error!(?key, %err, "trigger dispatch failed");
                }
            });
            timers.insert(
                timer_id,
                TimerEntry {
                    key,
                    handle: task.abort_handle(),
                },
            );
        }

        tracing::debug!(%timer_id, ?key, %fire_at, "timer registered");
        Ok(timer_id)
    }

    async fn cancel(&self, timer_id: TimerId) -> Result<(), DomainError> {
        if let Some(entry) = self
            .timers
            .lock()
            .expect("scheduler lock poisoned")
            .remove(&timer_id)
        {
            entry.handle.abort();
            tracing::debug!(%timer_id, "timer cancelled");
        }
        Ok(())
    }

    async fn reschedule(
        &self,
        timer_id: TimerId,
        fire_at: Timestamp,
    ) -> Result<TimerId, DomainError> {
        let key = {
            let mut timers = self.timers.lock().expect("scheduler lock poisoned");
            let entry = timers.remove(&timer_id).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SchedulerError,
                    format!("Timer not found: {}", timer_id),
                )
            })?;
            entry.handle.abort();
            entry.key
        };
        self.register_once(key, fire_at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DiscussionId;
    use std::sync::Mutex as StdMutex;

    struct RecordingSink {
        fired: StdMutex<Vec<TimerKey>>,
        notify: tokio::sync::Notify,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                fired: StdMutex::new(Vec::new()),
                notify: tokio::sync::Notify::new(),
            }
        }
    }

    #[async_trait]
    impl TriggerSink for RecordingSink {
        async fn on_fire(&self, key: TimerKey) -> Result<(), DomainError> {
            self.fired.lock().unwrap().push(key);
            self.notify.notify_one();
            Ok(())
        }
    }

    #[tokio::test]
    async fn past_fire_time_fires_immediately() {
        let sink = Arc::new(RecordingSink::new());
        let scheduler = TokioTriggerScheduler::new(sink.clone());

        let key = TimerKey::OpenDiscussion(DiscussionId::new(1));
        scheduler
            .register_once(key, Timestamp::now().plus_secs(-10))
            .await
            .unwrap();

        sink.notify.notified().await;
        assert_eq!(sink.fired.lock().unwrap().as_slice(), &[key]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn immediate_fires_leave_no_stale_entries() {
        let sink = Arc::new(RecordingSink::new());
        let scheduler = TokioTriggerScheduler::new(sink.clone());

        // Zero-delay timers can fire before register_once returns; each
        // must still find and clear its own entry.
        for i in 0..8 {
            scheduler
                .register_once(
                    TimerKey::OpenDiscussion(DiscussionId::new(i)),
                    Timestamp::now().plus_secs(-1),
                )
                .await
                .unwrap();
        }

        for _ in 0..200 {
            if sink.fired.lock().unwrap().len() == 8 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert_eq!(sink.fired.lock().unwrap().len(), 8);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn cancelled_timer_never_fires() {
        let sink = Arc::new(RecordingSink::new());
        let scheduler = TokioTriggerScheduler::new(sink.clone());

        let timer_id = scheduler
            .register_once(
                TimerKey::CloseDiscussion(DiscussionId::new(2)),
                Timestamp::now().plus_hours(1),
            )
            .await
            .unwrap();
        scheduler.cancel(timer_id).await.unwrap();

        assert_eq!(scheduler.pending(), 0);
        assert!(sink.fired.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reschedule_keeps_the_key() {
        let sink = Arc::new(RecordingSink::new());
        let scheduler = TokioTriggerScheduler::new(sink.clone());

        let key = TimerKey::OpenDiscussion(DiscussionId::new(3));
        let timer_id = scheduler
            .register_once(key, Timestamp::now().plus_hours(1))
            .await
            .unwrap();

        let new_id = scheduler
            .reschedule(timer_id, Timestamp::now().plus_secs(-1))
            .await
            .unwrap();
        assert_ne!(new_id, timer_id);

        sink.notify.notified().await;
        assert_eq!(sink.fired.lock().unwrap().as_slice(), &[key]);
    }

    #[tokio::test]
    async fn rescheduling_unknown_timer_fails() {
        let sink = Arc::new(RecordingSink::new());
        let scheduler = TokioTriggerScheduler::new(sink);

        let err = scheduler
            .reschedule(TimerId::new(), Timestamp::now())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SchedulerError);
    }
}
