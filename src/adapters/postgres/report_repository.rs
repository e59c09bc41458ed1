//! PostgreSQL implementation of ReportRepository.
//!
//! Escalation and rejection are multi-row decisions, so both run inside
//! a transaction that locks the target row first. The target's
//! view-status flip is the escalation gate: once a target is blocked,
//! later reports never re-fire the escalation.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ReportId, Timestamp};
use crate::domain::report::{Report, ReportStatus, ReportTarget, TargetKind};
use crate::ports::ReportRepository;

use super::discussion_repository::db_error;
use super::participant_repository::is_unique_violation;

/// PostgreSQL implementation of ReportRepository.
#[derive(Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    /// Creates a new PostgresReportRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn next_id(&self) -> Result<ReportId, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT nextval('reports_id_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to reserve report id: {}", e)))?;

        Ok(ReportId::new(result.0))
    }

    async fn save(&self, report: &Report) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reports (
                id, reporter_id, reported_id, target_kind, target_id,
                reason, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(report.id().value())
        .bind(report.reporter_id().value())
        .bind(report.reported_id().value())
        .bind(report.target().kind.as_str())
        .bind(report.target().id)
        .bind(report.reason())
        .bind(report.status().as_str())
        .bind(report.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::DuplicateReport,
                    format!(
                        "Member {} already holds an active report on {}",
                        report.reporter_id(),
                        report.target()
                    ),
                )
            } else {
                db_error(format!("Failed to insert report: {}", e))
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: ReportId) -> Result<Option<Report>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, reporter_id, reported_id, target_kind, target_id,
                   reason, status, created_at
            FROM reports WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to fetch report: {}", e)))?;

        row.map(row_to_report).transpose()
    }

    async fn exists_active(
        &self,
        target: ReportTarget,
        reporter_id: MemberId,
    ) -> Result<bool, DomainError> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reports
                WHERE target_kind = $1 AND target_id = $2
                  AND reporter_id = $3 AND status <> 'REJECTED'
            )
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id)
        .bind(reporter_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to check active report: {}", e)))?;

        Ok(exists.0)
    }

    async fn escalate_if_threshold(
        &self,
        target: ReportTarget,
        threshold: u32,
    ) -> Result<Option<u32>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error(format!("Failed to begin transaction: {}", e)))?;

        // Lock the target row so racing escalations serialize here.
        let view_status: Option<(String,)> = sqlx::query_as(&format!(
            "SELECT view_status FROM {} WHERE id = $1 FOR UPDATE",
            target_table(target.kind)
        ))
        .bind(target.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error(format!("Failed to lock report target: {}", e)))?;

        let Some((view_status,)) = view_status else {
            return Err(target_not_found(target));
        };

        if view_status == "BLOCKED" {
            return Ok(None);
        }

        // Only undecided reports count toward the threshold; an accepted
        // report blocks its reporter from re-filing but adds no weight.
        let active: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM reports
            WHERE target_kind = $1 AND target_id = $2
              AND status IN ('PENDING', 'TEMPORARY_ACCEPTED')
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error(format!("Failed to count active reports: {}", e)))?;

        let active = active.0 as u32;
        if active < threshold {
            return Ok(None);
        }

        sqlx::query(
            r#"
            UPDATE reports SET status = 'TEMPORARY_ACCEPTED'
            WHERE target_kind = $1 AND target_id = $2 AND status = 'PENDING'
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error(format!("Failed to escalate pending reports: {}", e)))?;

        sqlx::query(&format!(
            "UPDATE {} SET view_status = 'BLOCKED' WHERE id = $1",
            target_table(target.kind)
        ))
        .bind(target.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error(format!("Failed to block report target: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| db_error(format!("Failed to commit escalation: {}", e)))?;

        Ok(Some(active))
    }

    async fn set_status(&self, id: ReportId, status: ReportStatus) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE reports SET status = $2 WHERE id = $1")
            .bind(id.value())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to set report status: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(report_not_found(id));
        }
        Ok(())
    }

    async fn reject_and_maybe_unblock(&self, id: ReportId) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error(format!("Failed to begin transaction: {}", e)))?;

        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT target_kind, target_id FROM reports WHERE id = $1 FOR UPDATE")
                .bind(id.value())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error(format!("Failed to lock report: {}", e)))?;

        let Some((kind, target_id)) = row else {
            return Err(report_not_found(id));
        };
        let kind = parse_target_kind(&kind)?;

        sqlx::query("UPDATE reports SET status = 'REJECTED' WHERE id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error(format!("Failed to reject report: {}", e)))?;

        // Unblock only when no accepted-side report still holds the target.
        let holders: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM reports
            WHERE target_kind = $1 AND target_id = $2
              AND status IN ('ACCEPTED', 'TEMPORARY_ACCEPTED')
            "#,
        )
        .bind(kind.as_str())
        .bind(target_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error(format!("Failed to count blocking reports: {}", e)))?;

        let mut unblocked = false;
        if holders.0 == 0 {
            let result = sqlx::query(&format!(
                "UPDATE {} SET view_status = 'NORMAL' WHERE id = $1 AND view_status = 'BLOCKED'",
                target_table(kind)
            ))
            .bind(target_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error(format!("Failed to unblock report target: {}", e)))?;

            unblocked = result.rows_affected() > 0;
        }

        tx.commit()
            .await
            .map_err(|e| db_error(format!("Failed to commit rejection: {}", e)))?;

        Ok(unblocked)
    }
}

pub(super) fn target_table(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Discussion => "discussions",
        TargetKind::Comment => "comments",
    }
}

pub(super) fn parse_target_kind(s: &str) -> Result<TargetKind, DomainError> {
    s.parse()
        .map_err(|e: String| DomainError::new(ErrorCode::InvalidFormat, e))
}

fn parse_report_status(s: &str) -> Result<ReportStatus, DomainError> {
    s.parse()
        .map_err(|e: String| DomainError::new(ErrorCode::InvalidFormat, e))
}

fn report_not_found(id: ReportId) -> DomainError {
    DomainError::new(
        ErrorCode::ReportNotFound,
        format!("Report not found: {}", id),
    )
}

fn target_not_found(target: ReportTarget) -> DomainError {
    let (code, name) = match target.kind {
        TargetKind::Discussion => (ErrorCode::DiscussionNotFound, "Discussion"),
        TargetKind::Comment => (ErrorCode::CommentNotFound, "Comment"),
    };
    DomainError::new(code, format!("{} not found: {}", name, target.id))
}

fn row_to_report(row: sqlx::postgres::PgRow) -> Result<Report, DomainError> {
    let kind: String = row.get("target_kind");
    let status: String = row.get("status");

    Ok(Report::reconstitute(
        ReportId::new(row.get("id")),
        MemberId::new(row.get("reporter_id")),
        MemberId::new(row.get("reported_id")),
        ReportTarget {
            kind: parse_target_kind(&kind)?,
            id: row.get("target_id"),
        },
        row.get("reason"),
        parse_report_status(&status)?,
        Timestamp::from_datetime(row.get("created_at")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_kind_maps_to_table() {
        assert_eq!(target_table(TargetKind::Discussion), "discussions");
        assert_eq!(target_table(TargetKind::Comment), "comments");
    }

    #[test]
    fn report_status_parses_persisted_strings() {
        for status in [
            ReportStatus::Pending,
            ReportStatus::TemporaryAccepted,
            ReportStatus::Accepted,
            ReportStatus::Rejected,
        ] {
            assert_eq!(parse_report_status(status.as_str()).unwrap(), status);
        }
        assert!(parse_report_status("ON_HOLD").is_err());
    }
}
