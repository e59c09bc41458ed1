//! SubmitReportHandler - files a report and runs threshold escalation.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, ErrorCode, EventId, SerializableDomainEvent, Timestamp,
};
use crate::domain::report::{
    Report, ReportError, ReportSubmitted, ReportTarget, TargetBlocked, ESCALATION_THRESHOLD,
};
use crate::ports::{EventPublisher, ReportRepository, TargetDirectory};

/// Command to report a discussion or comment.
#[derive(Debug, Clone)]
pub struct SubmitReportCommand {
    pub target: ReportTarget,
    pub reason: String,
}

/// Result of filing a report.
#[derive(Debug, Clone)]
pub struct SubmitReportResult {
    pub report: Report,
    /// Active-report count at escalation, when this submission tipped
    /// the threshold and blocked the target.
    pub escalated: Option<u32>,
}

/// Handler for submitting reports.
///
/// Escalation is delegated to the repository as one atomic decision:
/// count active reports, and when the threshold is met while the target
/// is still visible, flip every Pending report to TemporaryAccepted and
/// block the target. The view-status flip gates the escalation, so it
/// fires exactly once per target.
pub struct SubmitReportHandler {
    repository: Arc<dyn ReportRepository>,
    target_directory: Arc<dyn TargetDirectory>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitReportHandler {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        target_directory: Arc<dyn TargetDirectory>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            target_directory,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitReportCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitReportResult, ReportError> {
        // 1. Resolve the target's owner
        let owner = self
            .target_directory
            .owner_of(cmd.target)
            .await?
            .ok_or_else(|| ReportError::target_not_found(cmd.target))?;

        // 2. One active report per (reporter, target)
        if self
            .repository
            .exists_active(cmd.target, metadata.member_id)
            .await?
        {
            return Err(ReportError::duplicate_report(cmd.target));
        }

        // 3. File the report (validates reason and self-report)
        let id = self.repository.next_id().await?;
        let report = Report::submit(
            id,
            metadata.member_id,
            owner,
            cmd.target,
            cmd.reason,
            Timestamp::now(),
        )?;
        self.repository.save(&report).await.map_err(|err| {
            if err.code == ErrorCode::DuplicateReport {
                ReportError::duplicate_report(cmd.target)
            } else {
                err.into()
            }
        })?;

        // 4. Threshold escalation, atomic in the store
        let escalated = self
            .repository
            .escalate_if_threshold(cmd.target, ESCALATION_THRESHOLD)
            .await?;

        // 5. Publish
        let submitted = ReportSubmitted {
            event_id: EventId::new(),
            report_id: id,
            reporter_id: metadata.member_id,
            target: cmd.target,
            submitted_at: report.created_at(),
        };
        self.event_publisher
            .publish(
                submitted
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id())
                    .with_member_id(metadata.member_id.to_string()),
            )
            .await?;

        if let Some(active_reports) = escalated {
            let blocked = TargetBlocked {
                event_id: EventId::new(),
                report_id: id,
                target: cmd.target,
                active_reports,
                blocked_at: Timestamp::now(),
            };
            self.event_publisher
                .publish(
                    blocked
                        .to_envelope()
                        .with_correlation_id(metadata.correlation_id()),
                )
                .await?;
            tracing::warn!(target = %cmd.target, active_reports, "report threshold reached, target blocked");
        }

        tracing::info!(report_id = %id, target = %cmd.target, "report submitted");
        Ok(SubmitReportResult { report, escalated })
    }
}
