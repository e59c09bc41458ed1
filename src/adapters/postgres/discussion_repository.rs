//! PostgreSQL implementation of DiscussionRepository.
//!
//! Persists the Discussion aggregate as one row. The lifecycle CAS and
//! the counter bumps are single UPDATE statements so concurrent triggers
//! and votes never need application-level locking.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::discussion::{AnalysisVerdict, BookRef, Discussion, DiscussionStatus};
use crate::domain::foundation::{
    DiscussionId, DomainError, ErrorCode, MemberId, Percentage, TimerId, Timestamp, ViewStatus,
};
use crate::domain::vote::VoteType;
use crate::ports::DiscussionRepository;

/// PostgreSQL implementation of DiscussionRepository.
#[derive(Clone)]
pub struct PostgresDiscussionRepository {
    pool: PgPool,
}

impl PostgresDiscussionRepository {
    /// Creates a new PostgresDiscussionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiscussionRepository for PostgresDiscussionRepository {
    async fn next_id(&self) -> Result<DiscussionId, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT nextval('discussions_id_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to reserve discussion id: {}", e)))?;

        Ok(DiscussionId::new(result.0))
    }

    async fn save(&self, discussion: &Discussion) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO discussions (
                id, isbn, book_title, book_cover_url, author_id, title, content,
                status, view_status, start_date, ends_at, closed_at, created_at,
                views, agree_count, disagree_count, conclusion, verdict,
                agree_percent, analysis_attempts, open_timer, close_timer
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                      $14, $15, $16, $17, $18, $19, $20, $21, $22)
            "#,
        )
        .bind(discussion.id().value())
        .bind(discussion.book().isbn())
        .bind(discussion.book().title())
        .bind(discussion.book().cover_url())
        .bind(discussion.author_id().value())
        .bind(discussion.title())
        .bind(discussion.content())
        .bind(discussion.status().as_str())
        .bind(view_status_to_str(discussion.view_status()))
        .bind(discussion.start_date().as_datetime())
        .bind(discussion.ends_at().as_datetime())
        .bind(discussion.closed_at().map(|t| *t.as_datetime()))
        .bind(discussion.created_at().as_datetime())
        .bind(discussion.views() as i64)
        .bind(discussion.tally().agree_count() as i32)
        .bind(discussion.tally().disagree_count() as i32)
        .bind(discussion.analysis().map(|a| a.conclusion.clone()))
        .bind(discussion.analysis().and_then(|a| a.verdict))
        .bind(
            discussion
                .analysis()
                .and_then(|a| a.agree_percent)
                .map(|p| p.value() as i16),
        )
        .bind(discussion.analysis_attempts() as i32)
        .bind(discussion.open_timer().map(|t| *t.as_uuid()))
        .bind(discussion.close_timer().map(|t| *t.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to insert discussion: {}", e)))?;

        Ok(())
    }

    async fn update(&self, discussion: &Discussion) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE discussions SET
                title = $2,
                content = $3,
                status = $4,
                view_status = $5,
                start_date = $6,
                ends_at = $7,
                closed_at = $8,
                views = $9,
                agree_count = $10,
                disagree_count = $11,
                conclusion = $12,
                verdict = $13,
                agree_percent = $14,
                analysis_attempts = $15,
                open_timer = $16,
                close_timer = $17
            WHERE id = $1
            "#,
        )
        .bind(discussion.id().value())
        .bind(discussion.title())
        .bind(discussion.content())
        .bind(discussion.status().as_str())
        .bind(view_status_to_str(discussion.view_status()))
        .bind(discussion.start_date().as_datetime())
        .bind(discussion.ends_at().as_datetime())
        .bind(discussion.closed_at().map(|t| *t.as_datetime()))
        .bind(discussion.views() as i64)
        .bind(discussion.tally().agree_count() as i32)
        .bind(discussion.tally().disagree_count() as i32)
        .bind(discussion.analysis().map(|a| a.conclusion.clone()))
        .bind(discussion.analysis().and_then(|a| a.verdict))
        .bind(
            discussion
                .analysis()
                .and_then(|a| a.agree_percent)
                .map(|p| p.value() as i16),
        )
        .bind(discussion.analysis_attempts() as i32)
        .bind(discussion.open_timer().map(|t| *t.as_uuid()))
        .bind(discussion.close_timer().map(|t| *t.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to update discussion: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(discussion.id()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: DiscussionId) -> Result<Option<Discussion>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, isbn, book_title, book_cover_url, author_id, title, content,
                   status, view_status, start_date, ends_at, closed_at, created_at,
                   views, agree_count, disagree_count, conclusion, verdict,
                   agree_percent, analysis_attempts, open_timer, close_timer
            FROM discussions WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to fetch discussion: {}", e)))?;

        row.map(row_to_discussion).transpose()
    }

    async fn transition_status(
        &self,
        id: DiscussionId,
        expected: DiscussionStatus,
        next: DiscussionStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE discussions SET status = $3 WHERE id = $1 AND status = $2")
            .bind(id.value())
            .bind(expected.as_str())
            .bind(next.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to transition discussion status: {}", e)))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Distinguish "already transitioned" from "doesn't exist".
        let exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM discussions WHERE id = $1")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to check discussion existence: {}", e)))?;

        if exists.0 == 0 {
            return Err(not_found(id));
        }
        Ok(false)
    }

    async fn apply_analysis(
        &self,
        id: DiscussionId,
        verdict: &AnalysisVerdict,
        closed_at: Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE discussions SET
                status = $2,
                conclusion = $3,
                verdict = $4,
                agree_percent = $5,
                closed_at = $6
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(DiscussionStatus::Closed.as_str())
        .bind(&verdict.conclusion)
        .bind(verdict.verdict)
        .bind(verdict.agree_percent.map(|p| p.value() as i16))
        .bind(closed_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to apply analysis verdict: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn increment_views(&self, id: DiscussionId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE discussions SET views = views + 1 WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to increment views: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn increment_vote_count(
        &self,
        id: DiscussionId,
        vote_type: VoteType,
    ) -> Result<(), DomainError> {
        let sql = match vote_type {
            VoteType::Agree => "UPDATE discussions SET agree_count = agree_count + 1 WHERE id = $1",
            VoteType::Disagree => {
                "UPDATE discussions SET disagree_count = disagree_count + 1 WHERE id = $1"
            }
        };

        let result = sqlx::query(sql)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to increment vote count: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn set_view_status(
        &self,
        id: DiscussionId,
        view_status: ViewStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE discussions SET view_status = $2 WHERE id = $1")
            .bind(id.value())
            .bind(view_status_to_str(view_status))
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to set discussion view status: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────

pub(super) fn db_error(message: String) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, message)
}

fn not_found(id: DiscussionId) -> DomainError {
    DomainError::new(
        ErrorCode::DiscussionNotFound,
        format!("Discussion not found: {}", id),
    )
}

pub(super) fn view_status_to_str(status: ViewStatus) -> &'static str {
    match status {
        ViewStatus::Normal => "NORMAL",
        ViewStatus::Blocked => "BLOCKED",
    }
}

pub(super) fn str_to_view_status(s: &str) -> Result<ViewStatus, DomainError> {
    match s {
        "NORMAL" => Ok(ViewStatus::Normal),
        "BLOCKED" => Ok(ViewStatus::Blocked),
        other => Err(DomainError::new(
            ErrorCode::InvalidFormat,
            format!("Invalid view status: {}", other),
        )),
    }
}

pub(super) fn parse_status(s: &str) -> Result<DiscussionStatus, DomainError> {
    s.parse()
        .map_err(|e: String| DomainError::new(ErrorCode::InvalidFormat, e))
}

fn row_to_discussion(row: sqlx::postgres::PgRow) -> Result<Discussion, DomainError> {
    let isbn: String = row.get("isbn");
    let book_title: String = row.get("book_title");
    let book_cover_url: Option<String> = row.get("book_cover_url");
    let book = BookRef::new(isbn, book_title, book_cover_url)
        .map_err(|e| DomainError::new(ErrorCode::InvalidFormat, e.to_string()))?;

    let status: String = row.get("status");
    let view_status: String = row.get("view_status");
    let closed_at: Option<chrono::DateTime<chrono::Utc>> = row.get("closed_at");
    let conclusion: Option<String> = row.get("conclusion");
    let verdict: Option<bool> = row.get("verdict");
    let agree_percent: Option<i16> = row.get("agree_percent");
    let open_timer: Option<Uuid> = row.get("open_timer");
    let close_timer: Option<Uuid> = row.get("close_timer");

    let analysis = conclusion.map(|conclusion| AnalysisVerdict {
        conclusion,
        verdict,
        agree_percent: agree_percent.map(|p| Percentage::new(p as u8)),
    });

    Ok(Discussion::reconstitute(
        DiscussionId::new(row.get("id")),
        book,
        MemberId::new(row.get("author_id")),
        row.get("title"),
        row.get("content"),
        parse_status(&status)?,
        str_to_view_status(&view_status)?,
        Timestamp::from_datetime(row.get("start_date")),
        Timestamp::from_datetime(row.get("ends_at")),
        closed_at.map(Timestamp::from_datetime),
        Timestamp::from_datetime(row.get("created_at")),
        row.get::<i64, _>("views") as u64,
        row.get::<i32, _>("agree_count") as u32,
        row.get::<i32, _>("disagree_count") as u32,
        analysis,
        row.get::<i32, _>("analysis_attempts") as u32,
        open_timer.map(TimerId::from_uuid),
        close_timer.map(TimerId::from_uuid),
    ))
}
