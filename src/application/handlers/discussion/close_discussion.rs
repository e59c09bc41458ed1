//! CloseDiscussionHandler - trigger handler for the close timer.
//!
//! Moves the debate Ongoing -> Analyzing with a compare-and-set, hands
//! the full thread to the analysis provider, and applies the verdict as
//! Analyzing -> Closed. A provider failure leaves the debate in
//! Analyzing so a later fire can retry, up to a bounded attempt count.

use std::sync::Arc;

use crate::domain::discussion::{DiscussionError, DiscussionStatus};
use crate::domain::foundation::DiscussionId;
use crate::ports::{
    AnalysisComment, AnalysisProvider, AnalysisRequest, CommentReader, DiscussionRepository,
    EventPublisher,
};

use super::ApplyAnalysisHandler;

/// Default bound on analysis retries before operators take over.
pub const DEFAULT_MAX_ANALYSIS_ATTEMPTS: u32 = 3;

/// Handler for the debate close trigger.
pub struct CloseDiscussionHandler {
    repository: Arc<dyn DiscussionRepository>,
    comment_reader: Arc<dyn CommentReader>,
    analysis_provider: Arc<dyn AnalysisProvider>,
    apply_analysis: ApplyAnalysisHandler,
    max_analysis_attempts: u32,
}

impl CloseDiscussionHandler {
    pub fn new(
        repository: Arc<dyn DiscussionRepository>,
        comment_reader: Arc<dyn CommentReader>,
        analysis_provider: Arc<dyn AnalysisProvider>,
        event_publisher: Arc<dyn EventPublisher>,
        max_analysis_attempts: u32,
    ) -> Self {
        let apply_analysis = ApplyAnalysisHandler::new(repository.clone(), event_publisher);
        Self {
            repository,
            comment_reader,
            analysis_provider,
            apply_analysis,
            max_analysis_attempts,
        }
    }

    /// Fires the close transition. Returns whether the debate closed on
    /// this fire.
    pub async fn handle(&self, discussion_id: DiscussionId) -> Result<bool, DiscussionError> {
        let discussion = self
            .repository
            .find_by_id(discussion_id)
            .await?
            .ok_or_else(|| DiscussionError::not_found(discussion_id))?;

        match discussion.status() {
            DiscussionStatus::Ongoing => {
                let swapped = self
                    .repository
                    .transition_status(
                        discussion_id,
                        DiscussionStatus::Ongoing,
                        DiscussionStatus::Analyzing,
                    )
                    .await?;
                if !swapped {
                    tracing::debug!(
                        discussion_id = %discussion_id,
                        "close trigger absorbed, discussion already transitioned"
                    );
                    return Ok(false);
                }
            }
            // A previous fire won the swap but analysis did not finish;
            // this fire becomes a retry.
            DiscussionStatus::Analyzing => {}
            other => {
                tracing::debug!(
                    discussion_id = %discussion_id,
                    status = %other,
                    "close trigger absorbed, nothing to do"
                );
                return Ok(false);
            }
        }

        self.analyze_and_close(discussion_id).await
    }

    async fn analyze_and_close(&self, discussion_id: DiscussionId) -> Result<bool, DiscussionError> {
        // Reload under the new status to get fresh counters.
        let mut discussion = self
            .repository
            .find_by_id(discussion_id)
            .await?
            .ok_or_else(|| DiscussionError::not_found(discussion_id))?;

        if discussion.analysis_attempts() >= self.max_analysis_attempts {
            tracing::error!(
                discussion_id = %discussion_id,
                attempts = discussion.analysis_attempts(),
                "analysis attempts exhausted, leaving discussion in ANALYZING"
            );
            return Ok(false);
        }
        let attempt = discussion.note_analysis_attempt();
        self.repository.update(&discussion).await?;

        let comments = self.comment_reader.find_by_discussion(discussion_id).await?;
        let tally = discussion.tally();
        let request = AnalysisRequest {
            discussion_id,
            title: discussion.title().to_string(),
            content: discussion.content().to_string(),
            book_title: discussion.book().title().to_string(),
            agree_count: tally.agree_count(),
            disagree_count: tally.disagree_count(),
            comments: comments
                .iter()
                .filter(|c| !c.is_blocked())
                .map(|c| AnalysisComment {
                    vote_type: c.vote_type(),
                    content: c.content().to_string(),
                    like_count: c.like_count(),
                })
                .collect(),
        };

        let outcome = match self.analysis_provider.analyze(&request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    discussion_id = %discussion_id,
                    attempt,
                    error = %err,
                    "debate analysis failed, discussion stays in ANALYZING"
                );
                return Err(err.into());
            }
        };

        self.apply_analysis
            .handle(discussion_id, outcome.into_verdict())
            .await?;

        tracing::info!(discussion_id = %discussion_id, attempt, "debate closed with verdict");
        Ok(true)
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
        RegisterDiscussionCommand, RegisterDiscussionHandler,
    };
    use crate::domain::discussion::DebatePolicy;
    use crate::domain::foundation::{CommandMetadata, MemberId, Percentage, Timestamp};

    const ISBN: &str = "9788932917245";

    struct Fixture {
        store: Arc<InMemoryStore>,
        provider: Arc<MockAnalysisProvider>,
        publisher: Arc<InMemoryEventBus>,
        handler: CloseDiscussionHandler,
    }

    async fn fixture(provider: MockAnalysisProvider) -> (Fixture, DiscussionId) {
        let store = Arc::new(InMemoryStore::new());
        let provider = Arc::new(provider);
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

        // The debate must be Ongoing for the close trigger to act.
        store
            .transition_status(id, DiscussionStatus::Waiting, DiscussionStatus::Ongoing)
            .await
            .unwrap();

        let handler = CloseDiscussionHandler::new(
            store.clone(),
            store.clone(),
            provider.clone(),
            publisher.clone(),
            DEFAULT_MAX_ANALYSIS_ATTEMPTS,
        );
        (
            Fixture {
                store,
                provider,
                publisher,
                handler,
            },
            id,
        )
    }

    #[tokio::test]
    async fn successful_fire_closes_with_verdict() {
        let (fx, id) =
            fixture(MockAnalysisProvider::new().with_verdict("Agree side carried it.", true, 64))
                .await;

        let closed = fx.handler.handle(id).await.unwrap();
        assert!(closed);

        let saved = fx.store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(saved.status(), DiscussionStatus::Closed);
        assert!(saved.closed_at().is_some());
        let verdict = saved.analysis().unwrap();
        assert_eq!(verdict.verdict, Some(true));
        assert_eq!(verdict.agree_percent, Some(Percentage::new(64)));

        let events = fx.publisher.events_of_type("discussion.closed");
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn provider_failure_leaves_analyzing_for_retry() {
        let (fx, id) = fixture(
            MockAnalysisProvider::new()
                .with_error("rate limited")
                .with_verdict("Second pass settled it.", false, 38),
        )
        .await;

        let result = fx.handler.handle(id).await;
        assert!(matches!(result, Err(DiscussionError::Analysis(_))));

        let saved = fx.store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(saved.status(), DiscussionStatus::Analyzing);
        assert_eq!(saved.analysis_attempts(), 1);

        // Retry fire succeeds from Analyzing.
        let closed = fx.handler.handle(id).await.unwrap();
        assert!(closed);
        let saved = fx.store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(saved.status(), DiscussionStatus::Closed);
        assert_eq!(saved.analysis_attempts(), 2);
    }

    #[tokio::test]
    async fn attempts_are_bounded() {
        let (fx, id) = fixture(
            MockAnalysisProvider::new()
                .with_error("down")
                .with_error("down")
                .with_error("down"),
        )
        .await;

        for _ in 0..3 {
            assert!(fx.handler.handle(id).await.is_err());
        }
        // Fourth fire refuses to call the provider again.
        let closed = fx.handler.handle(id).await.unwrap();
        assert!(!closed);
        assert_eq!(fx.provider.call_count(), 3);
    }

    #[tokio::test]
    async fn duplicate_fire_after_close_is_absorbed() {
        let (fx, id) = fixture(MockAnalysisProvider::new().with_verdict("Done.", true, 55)).await;

        assert!(fx.handler.handle(id).await.unwrap());
        assert!(!fx.handler.handle(id).await.unwrap());
        assert_eq!(fx.provider.call_count(), 1);
        assert_eq!(fx.publisher.events_of_type("discussion.closed").len(), 1);
    }

    #[tokio::test]
    async fn fire_while_waiting_is_a_no_op() {
        let (fx, id) = fixture(MockAnalysisProvider::new()).await;
        // Walk the fixture back to Waiting via a fresh discussion.
        let register = RegisterDiscussionHandler::new(
            fx.store.clone(),
            Arc::new(MockBookCatalog::new().with_book(ISBN, "The Vegetarian")),
            Arc::new(MockTriggerScheduler::new()),
            Arc::new(InMemoryEventBus::new()),
            DebatePolicy::default(),
        );
        let waiting = register
            .handle(
                RegisterDiscussionCommand {
                    isbn: ISBN.to_string(),
                    title: "Second debate".to_string(),
                    content: "Not yet open.".to_string(),
                    start_date: Timestamp::now().plus_hours(48),
                },
                CommandMetadata::new(MemberId::new(10)),
            )
            .await
            .unwrap();

        let closed = fx.handler.handle(waiting.discussion.id()).await.unwrap();
        assert!(!closed);
        assert_eq!(fx.provider.call_count(), 0);

        // The original Ongoing discussion is untouched.
        let saved = fx.store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(saved.status(), DiscussionStatus::Ongoing);
    }
}
