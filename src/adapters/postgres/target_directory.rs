//! PostgreSQL implementation of TargetDirectory.
//!
//! Dispatches on the target kind to the discussions or comments table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ViewStatus};
use crate::domain::report::{ReportTarget, TargetKind};
use crate::ports::TargetDirectory;

use super::discussion_repository::{db_error, str_to_view_status, view_status_to_str};
use super::report_repository::target_table;

/// PostgreSQL implementation of TargetDirectory.
#[derive(Clone)]
pub struct PostgresTargetDirectory {
    pool: PgPool,
}

impl PostgresTargetDirectory {
    /// Creates a new PostgresTargetDirectory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TargetDirectory for PostgresTargetDirectory {
    async fn owner_of(&self, target: ReportTarget) -> Result<Option<MemberId>, DomainError> {
        let row: Option<(i64,)> = sqlx::query_as(&format!(
            "SELECT author_id FROM {} WHERE id = $1",
            target_table(target.kind)
        ))
        .bind(target.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to fetch target owner: {}", e)))?;

        Ok(row.map(|(id,)| MemberId::new(id)))
    }

    async fn view_status_of(
        &self,
        target: ReportTarget,
    ) -> Result<Option<ViewStatus>, DomainError> {
        let row: Option<(String,)> = sqlx::query_as(&format!(
            "SELECT view_status FROM {} WHERE id = $1",
            target_table(target.kind)
        ))
        .bind(target.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to fetch target view status: {}", e)))?;

        row.map(|(s,)| str_to_view_status(&s)).transpose()
    }

    async fn set_view_status(
        &self,
        target: ReportTarget,
        view_status: ViewStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET view_status = $2 WHERE id = $1",
            target_table(target.kind)
        ))
        .bind(target.id)
        .bind(view_status_to_str(view_status))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to set target view status: {}", e)))?;

        if result.rows_affected() == 0 {
            let (code, name) = match target.kind {
                TargetKind::Discussion => (ErrorCode::DiscussionNotFound, "Discussion"),
                TargetKind::Comment => (ErrorCode::CommentNotFound, "Comment"),
            };
            return Err(DomainError::new(
                code,
                format!("{} not found: {}", name, target.id),
            ));
        }
        Ok(())
    }
}
