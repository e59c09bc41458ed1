//! ReviewReportHandler - admin decision on a report.

use std::sync::Arc;

use crate::domain::foundation::{
    AuthenticatedMember, CommandMetadata, EventId, ReportId, SerializableDomainEvent, Timestamp,
};
use crate::domain::report::{Report, ReportError, ReportReviewed, ReviewDecision};
use crate::ports::{EventPublisher, ReportRepository};

/// Command to review a report.
#[derive(Debug, Clone)]
pub struct ReviewReportCommand {
    pub report_id: ReportId,
    pub decision: ReviewDecision,
}

/// Result of a review.
#[derive(Debug, Clone)]
pub struct ReviewReportResult {
    pub report: Report,
    /// Whether the rejection reverted the target to Normal.
    pub target_unblocked: bool,
}

/// Handler for admin report review.
///
/// ACCEPT keeps the target blocked. REJECT reverts the target to Normal
/// only when it was the last Accepted/TemporaryAccepted report holding
/// the block; that decision runs atomically in the store.
pub struct ReviewReportHandler {
    repository: Arc<dyn ReportRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ReviewReportHandler {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReviewReportCommand,
        reviewer: AuthenticatedMember,
        metadata: CommandMetadata,
    ) -> Result<ReviewReportResult, ReportError> {
        if !reviewer.is_admin() {
            return Err(ReportError::forbidden());
        }

        let mut report = self
            .repository
            .find_by_id(cmd.report_id)
            .await?
            .ok_or_else(|| ReportError::not_found(cmd.report_id))?;

        // Domain validation of the transition; persistence follows.
        report.review(cmd.decision)?;

        let target_unblocked = match cmd.decision {
            ReviewDecision::Accept => {
                self.repository
                    .set_status(cmd.report_id, report.status())
                    .await?;
                false
            }
            ReviewDecision::Reject => self.repository.reject_and_maybe_unblock(cmd.report_id).await?,
        };

        let event = ReportReviewed {
            event_id: EventId::new(),
            report_id: cmd.report_id,
            reviewer_id: reviewer.id,
            decision: cmd.decision,
            target_unblocked,
            reviewed_at: Timestamp::now(),
        };
        self.event_publisher
            .publish(
                event
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id())
                    .with_member_id(reviewer.id.to_string()),
            )
            .await?;

        tracing::info!(
            report_id = %cmd.report_id,
            decision = ?cmd.decision,
            target_unblocked,
            "report reviewed"
        );
        Ok(ReviewReportResult {
            report,
            target_unblocked,
        })
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
    use crate::application::handlers::report::{SubmitReportCommand, SubmitReportHandler};
    use crate::domain::discussion::DebatePolicy;
    use crate::domain::foundation::{MemberId, MemberRole, ViewStatus};
    use crate::domain::report::{ReportStatus, ReportTarget};
    use crate::ports::TargetDirectory;

    const ISBN: &str = "9788932917245";

    fn admin() -> AuthenticatedMember {
        AuthenticatedMember {
            id: MemberId::new(1),
            role: MemberRole::Admin,
        }
    }

    fn member() -> AuthenticatedMember {
        AuthenticatedMember {
            id: MemberId::new(99),
            role: MemberRole::Member,
        }
    }

    struct Fixture {
        store: Arc<InMemoryStore>,
        publisher: Arc<InMemoryEventBus>,
        handler: ReviewReportHandler,
        target: ReportTarget,
        report_ids: Vec<ReportId>,
    }

    /// Registers a debate, files three reports so escalation blocks the
    /// target, and returns the escalated state.
    async fn escalated_fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let publisher = Arc::new(InMemoryEventBus::new());
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
        let target = ReportTarget::discussion(result.discussion.id().value());

        let submit = SubmitReportHandler::new(store.clone(), store.clone(), publisher.clone());
        let mut report_ids = Vec::new();
        for reporter in [21, 22, 23] {
            let filed = submit
                .handle(
                    SubmitReportCommand {
                        target,
                        reason: "Spoils the ending without warning".to_string(),
                    },
                    CommandMetadata::new(MemberId::new(reporter)),
                )
                .await
                .unwrap();
            report_ids.push(filed.report.id());
        }

        Fixture {
            handler: ReviewReportHandler::new(store.clone(), publisher.clone()),
            store,
            publisher,
            target,
            report_ids,
        }
    }

    #[tokio::test]
    async fn accept_keeps_the_target_blocked() {
        let fx = escalated_fixture().await;

        let result = fx
            .handler
            .handle(
                ReviewReportCommand {
                    report_id: fx.report_ids[0],
                    decision: ReviewDecision::Accept,
                },
                admin(),
                CommandMetadata::new(MemberId::new(1)),
            )
            .await
            .unwrap();

        assert_eq!(result.report.status(), ReportStatus::Accepted);
        assert!(!result.target_unblocked);
        assert_eq!(
            fx.store.view_status_of(fx.target).await.unwrap(),
            Some(ViewStatus::Blocked)
        );
        assert_eq!(fx.publisher.events_of_type("report.reviewed").len(), 1);
    }

    #[tokio::test]
    async fn rejecting_the_last_holder_unblocks_the_target() {
        let fx = escalated_fixture().await;

        for (idx, report_id) in fx.report_ids.iter().enumerate() {
            let result = fx
                .handler
                .handle(
                    ReviewReportCommand {
                        report_id: *report_id,
                        decision: ReviewDecision::Reject,
                    },
                    admin(),
                    CommandMetadata::new(MemberId::new(1)),
                )
                .await
                .unwrap();

            let is_last = idx == fx.report_ids.len() - 1;
            assert_eq!(result.target_unblocked, is_last);
        }

        assert_eq!(
            fx.store.view_status_of(fx.target).await.unwrap(),
            Some(ViewStatus::Normal)
        );
    }

    #[tokio::test]
    async fn accepted_report_keeps_block_through_other_rejections() {
        let fx = escalated_fixture().await;

        fx.handler
            .handle(
                ReviewReportCommand {
                    report_id: fx.report_ids[0],
                    decision: ReviewDecision::Accept,
                },
                admin(),
                CommandMetadata::new(MemberId::new(1)),
            )
            .await
            .unwrap();

        // Rejecting the rest never unblocks: an Accepted report remains.
        for report_id in &fx.report_ids[1..] {
            let result = fx
                .handler
                .handle(
                    ReviewReportCommand {
                        report_id: *report_id,
                        decision: ReviewDecision::Reject,
                    },
                    admin(),
                    CommandMetadata::new(MemberId::new(1)),
                )
                .await
                .unwrap();
            assert!(!result.target_unblocked);
        }

        assert_eq!(
            fx.store.view_status_of(fx.target).await.unwrap(),
            Some(ViewStatus::Blocked)
        );
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let fx = escalated_fixture().await;
        let result = fx
            .handler
            .handle(
                ReviewReportCommand {
                    report_id: fx.report_ids[0],
                    decision: ReviewDecision::Accept,
                },
                member(),
                CommandMetadata::new(MemberId::new(99)),
            )
            .await;
        assert!(matches!(result, Err(ReportError::Forbidden)));
    }

    #[tokio::test]
    async fn double_review_is_rejected() {
        let fx = escalated_fixture().await;
        let cmd = ReviewReportCommand {
            report_id: fx.report_ids[0],
            decision: ReviewDecision::Accept,
        };

        fx.handler
            .handle(cmd.clone(), admin(), CommandMetadata::new(MemberId::new(1)))
            .await
            .unwrap();
        let result = fx
            .handler
            .handle(cmd, admin(), CommandMetadata::new(MemberId::new(1)))
            .await;
        assert!(matches!(result, Err(ReportError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn unknown_report_is_not_found() {
        let fx = escalated_fixture().await;
        let result = fx
            .handler
            .handle(
                ReviewReportCommand {
                    report_id: ReportId::new(404),
                    decision: ReviewDecision::Reject,
                },
                admin(),
                CommandMetadata::new(MemberId::new(1)),
            )
            .await;
        assert!(matches!(result, Err(ReportError::NotFound(_))));
    }
}
