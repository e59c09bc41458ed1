//! In-memory report repository, escalation logic and target directory.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ReportId, ViewStatus};
use crate::domain::report::{Report, ReportStatus, ReportTarget, TargetKind};
use crate::ports::{ReportRepository, TargetDirectory};

use super::store::Tables;
use super::InMemoryStore;

fn not_found(id: ReportId) -> DomainError {
    DomainError::new(
        ErrorCode::ReportNotFound,
        format!("Report not found: {}", id),
    )
}

fn target_view_status(tables: &Tables, target: ReportTarget) -> Option<ViewStatus> {
    match target.kind {
        TargetKind::Discussion => tables.discussions.get(&target.id).map(|d| d.view_status()),
        TargetKind::Comment => tables.comments.get(&target.id).map(|c| c.view_status()),
    }
}

fn set_target_view_status(
    tables: &mut Tables,
    target: ReportTarget,
    view_status: ViewStatus,
) -> Result<(), DomainError> {
    match target.kind {
        TargetKind::Discussion => {
            let discussion = tables.discussions.get_mut(&target.id).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DiscussionNotFound,
                    format!("Discussion not found: {}", target.id),
                )
            })?;
            discussion.set_view_status(view_status);
        }
        TargetKind::Comment => {
            let comment = tables.comments.get_mut(&target.id).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::CommentNotFound,
                    format!("Comment not found: {}", target.id),
                )
            })?;
            comment.set_view_status(view_status);
        }
    }
    Ok(())
}

#[async_trait]
impl ReportRepository for InMemoryStore {
    async fn next_id(&self) -> Result<ReportId, DomainError> {
        Ok(ReportId::new(self.take_report_id()))
    }

    async fn save(&self, report: &Report) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let duplicate = tables.reports.values().any(|r| {
            r.target() == report.target()
                && r.reporter_id() == report.reporter_id()
                && r.status().is_active()
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicateReport,
                format!("An active report on {} already exists", report.target()),
            ));
        }
        tables.reports.insert(report.id().value(), report.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ReportId) -> Result<Option<Report>, DomainError> {
        Ok(self.lock().reports.get(&id.value()).cloned())
    }

    async fn exists_active(
        &self,
        target: ReportTarget,
        reporter_id: MemberId,
    ) -> Result<bool, DomainError> {
        Ok(self.lock().reports.values().any(|r| {
            r.target() == target && r.reporter_id() == reporter_id && r.status().is_active()
        }))
    }

    async fn escalate_if_threshold(
        &self,
        target: ReportTarget,
        threshold: u32,
    ) -> Result<Option<u32>, DomainError> {
        let mut tables = self.lock();

        // The view-status flip is the escalation gate; a target that is
        // already blocked was escalated before.
        match target_view_status(&tables, target) {
            Some(ViewStatus::Normal) => {}
            Some(ViewStatus::Blocked) => return Ok(None),
            None => return Ok(None),
        }

        let active = tables
            .reports
            .values()
            .filter(|r| r.target() == target && r.status().is_undecided())
            .count() as u32;
        if active < threshold {
            return Ok(None);
        }

        for report in tables.reports.values_mut() {
            if report.target() == target && report.status() == ReportStatus::Pending {
                report
                    .escalate()
                    .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
            }
        }
        set_target_view_status(&mut tables, target, ViewStatus::Blocked)?;
        Ok(Some(active))
    }

    async fn set_status(&self, id: ReportId, status: ReportStatus) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let report = tables
            .reports
            .get_mut(&id.value())
            .ok_or_else(|| not_found(id))?;
        *report = Report::reconstitute(
            report.id(),
            report.reporter_id(),
            report.reported_id(),
            report.target(),
            report.reason().to_string(),
            status,
            report.created_at(),
        );
        Ok(())
    }

    async fn reject_and_maybe_unblock(&self, id: ReportId) -> Result<bool, DomainError> {
        let mut tables = self.lock();
        let report = tables
            .reports
            .get_mut(&id.value())
            .ok_or_else(|| not_found(id))?;
        let target = report.target();
        *report = Report::reconstitute(
            report.id(),
            report.reporter_id(),
            report.reported_id(),
            target,
            report.reason().to_string(),
            ReportStatus::Rejected,
            report.created_at(),
        );

        let holding = tables.reports.values().any(|r| {
            r.target() == target
                && matches!(
                    r.status(),
                    ReportStatus::Accepted | ReportStatus::TemporaryAccepted
                )
        });
        if holding {
            return Ok(false);
        }

        let was_blocked = target_view_status(&tables, target) == Some(ViewStatus::Blocked);
        if was_blocked {
            set_target_view_status(&mut tables, target, ViewStatus::Normal)?;
        }
        Ok(was_blocked)
    }
}

#[async_trait]
impl TargetDirectory for InMemoryStore {
    async fn owner_of(&self, target: ReportTarget) -> Result<Option<MemberId>, DomainError> {
        let tables = self.lock();
        Ok(match target.kind {
            TargetKind::Discussion => tables.discussions.get(&target.id).map(|d| d.author_id()),
            TargetKind::Comment => tables.comments.get(&target.id).map(|c| c.author_id()),
        })
    }

    async fn view_status_of(
        &self,
        target: ReportTarget,
    ) -> Result<Option<ViewStatus>, DomainError> {
        Ok(target_view_status(&self.lock(), target))
    }

    async fn set_view_status(
        &self,
        target: ReportTarget,
        view_status: ViewStatus,
    ) -> Result<(), DomainError> {
        set_target_view_status(&mut self.lock(), target, view_status)
    }
}
