//! PostgreSQL implementation of DiscussionReader (read side).
//!
//! The list query orders by id descending and fetches one row past the
//! page size to detect whether another page exists. Viewer flags on the
//! detail view come from the participants and reports tables.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    CursorPage, DiscussionId, DomainError, ErrorCode, MemberId, ScrollQuery, Timestamp,
};
use crate::domain::vote::{VoteTally, VoteType};
use crate::ports::{DiscussionDetail, DiscussionFilter, DiscussionReader, DiscussionSummary};

use super::discussion_repository::{db_error, parse_status, str_to_view_status};

/// PostgreSQL implementation of DiscussionReader.
#[derive(Clone)]
pub struct PostgresDiscussionReader {
    pool: PgPool,
}

impl PostgresDiscussionReader {
    /// Creates a new PostgresDiscussionReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiscussionReader for PostgresDiscussionReader {
    async fn get_detail(
        &self,
        id: DiscussionId,
        viewer: Option<MemberId>,
    ) -> Result<Option<DiscussionDetail>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, isbn, book_title, book_cover_url, author_id, title, content,
                   status, view_status, start_date, ends_at, closed_at, created_at,
                   views, agree_count, disagree_count, conclusion, verdict
            FROM discussions WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to fetch discussion detail: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let (already_reported, my_vote) = match viewer {
            Some(member_id) => {
                let reported: (bool,) = sqlx::query_as(
                    r#"
                    SELECT EXISTS(
                        SELECT 1 FROM reports
                        WHERE target_kind = 'DISCUSSION' AND target_id = $1
                          AND reporter_id = $2 AND status <> 'REJECTED'
                    )
                    "#,
                )
                .bind(id.value())
                .bind(member_id.value())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error(format!("Failed to check report flag: {}", e)))?;

                let vote: Option<(String,)> = sqlx::query_as(
                    "SELECT vote_type FROM participants WHERE discussion_id = $1 AND member_id = $2",
                )
                .bind(id.value())
                .bind(member_id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error(format!("Failed to fetch viewer vote: {}", e)))?;

                let my_vote = vote.map(|(s,)| parse_vote_type(&s)).transpose()?;
                (reported.0, my_vote)
            }
            None => (false, None),
        };

        let status: String = row.get("status");
        let view_status: String = row.get("view_status");
        let closed_at: Option<chrono::DateTime<chrono::Utc>> = row.get("closed_at");
        let agree_count = row.get::<i32, _>("agree_count") as u32;
        let disagree_count = row.get::<i32, _>("disagree_count") as u32;
        let tally = VoteTally::new(agree_count, disagree_count);

        Ok(Some(DiscussionDetail {
            id: DiscussionId::new(row.get("id")),
            author_id: MemberId::new(row.get("author_id")),
            title: row.get("title"),
            content: row.get("content"),
            isbn: row.get("isbn"),
            book_title: row.get("book_title"),
            book_cover_url: row.get("book_cover_url"),
            status: parse_status(&status)?,
            view_status: str_to_view_status(&view_status)?,
            start_date: Timestamp::from_datetime(row.get("start_date")),
            ends_at: Timestamp::from_datetime(row.get("ends_at")),
            closed_at: closed_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.get("created_at")),
            views: row.get::<i64, _>("views") as u64,
            agree_count,
            disagree_count,
            agree_percent: tally.agree_percent(),
            disagree_percent: tally.disagree_percent(),
            conclusion: row.get("conclusion"),
            verdict: row.get("verdict"),
            already_reported,
            my_vote,
        }))
    }

    async fn scroll(
        &self,
        filter: &DiscussionFilter,
        query: ScrollQuery,
    ) -> Result<CursorPage<DiscussionSummary>, DomainError> {
        // Fetch one row beyond the page size to detect a next page.
        let limit = i64::from(query.size) + 1;

        let rows = sqlx::query(
            r#"
            SELECT d.id, d.title, d.book_title, d.book_cover_url, d.status,
                   d.view_status, d.start_date, d.views,
                   (SELECT COUNT(*) FROM comments c WHERE c.discussion_id = d.id) AS comment_count
            FROM discussions d
            WHERE ($1::text IS NULL OR d.status = $1)
              AND ($2::text IS NULL OR d.title ILIKE '%' || $2 || '%'
                                    OR d.book_title ILIKE '%' || $2 || '%')
              AND ($3 = 0 OR d.id < $3)
            ORDER BY d.id DESC
            LIMIT $4
            "#,
        )
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.keyword.as_deref())
        .bind(query.last_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to scroll discussions: {}", e)))?;

        let has_next = rows.len() as i64 > i64::from(query.size);
        let items = rows
            .into_iter()
            .take(query.size as usize)
            .map(row_to_summary)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CursorPage::new(items, has_next, |s| s.id.value()))
    }
}

fn row_to_summary(row: sqlx::postgres::PgRow) -> Result<DiscussionSummary, DomainError> {
    let status: String = row.get("status");
    let view_status: String = row.get("view_status");

    Ok(DiscussionSummary {
        id: DiscussionId::new(row.get("id")),
        title: row.get("title"),
        book_title: row.get("book_title"),
        book_cover_url: row.get("book_cover_url"),
        status: parse_status(&status)?,
        view_status: str_to_view_status(&view_status)?,
        start_date: Timestamp::from_datetime(row.get("start_date")),
        views: row.get::<i64, _>("views") as u64,
        comment_count: row.get::<i64, _>("comment_count") as u32,
    })
}

pub(super) fn parse_vote_type(s: &str) -> Result<VoteType, DomainError> {
    s.parse()
        .map_err(|e: String| DomainError::new(ErrorCode::InvalidFormat, e))
}
