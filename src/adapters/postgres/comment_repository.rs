//! PostgreSQL implementation of CommentRepository and CommentReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::comment::Comment;
use crate::domain::foundation::{
    CommentId, DiscussionId, DomainError, ErrorCode, MemberId, Timestamp, ViewStatus,
};
use crate::domain::vote::ReactionKind;
use crate::ports::{CommentReader, CommentRepository};

use super::discussion_reader::parse_vote_type;
use super::discussion_repository::{db_error, str_to_view_status, view_status_to_str};

/// PostgreSQL implementation of CommentRepository.
#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a new PostgresCommentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn next_id(&self) -> Result<CommentId, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT nextval('comments_id_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to reserve comment id: {}", e)))?;

        Ok(CommentId::new(result.0))
    }

    async fn save(&self, comment: &Comment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                id, discussion_id, author_id, parent_id, vote_type, content,
                like_count, dislike_count, view_status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(comment.id().value())
        .bind(comment.discussion_id().value())
        .bind(comment.author_id().value())
        .bind(comment.parent_id().map(|p| p.value()))
        .bind(comment.vote_type().as_str())
        .bind(comment.content())
        .bind(comment.like_count() as i32)
        .bind(comment.dislike_count() as i32)
        .bind(view_status_to_str(comment.view_status()))
        .bind(comment.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to insert comment: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, discussion_id, author_id, parent_id, vote_type, content,
                   like_count, dislike_count, view_status, created_at
            FROM comments WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to fetch comment: {}", e)))?;

        row.map(row_to_comment).transpose()
    }

    async fn increment_reaction_count(
        &self,
        id: CommentId,
        kind: ReactionKind,
    ) -> Result<(), DomainError> {
        let sql = match kind {
            ReactionKind::Like => "UPDATE comments SET like_count = like_count + 1 WHERE id = $1",
            ReactionKind::Dislike => {
                "UPDATE comments SET dislike_count = dislike_count + 1 WHERE id = $1"
            }
        };

        let result = sqlx::query(sql)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to increment reaction count: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn set_view_status(
        &self,
        id: CommentId,
        view_status: ViewStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE comments SET view_status = $2 WHERE id = $1")
            .bind(id.value())
            .bind(view_status_to_str(view_status))
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to set comment view status: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// PostgreSQL implementation of CommentReader.
#[derive(Clone)]
pub struct PostgresCommentReader {
    pool: PgPool,
}

impl PostgresCommentReader {
    /// Creates a new PostgresCommentReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentReader for PostgresCommentReader {
    async fn find_by_discussion(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, discussion_id, author_id, parent_id, vote_type, content,
                   like_count, dislike_count, view_status, created_at
            FROM comments WHERE discussion_id = $1
            ORDER BY id
            "#,
        )
        .bind(discussion_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to fetch comments: {}", e)))?;

        rows.into_iter().map(row_to_comment).collect()
    }

    async fn count_by_discussion(&self, discussion_id: DiscussionId) -> Result<u32, DomainError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE discussion_id = $1")
            .bind(discussion_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(format!("Failed to count comments: {}", e)))?;

        Ok(count.0 as u32)
    }
}

fn not_found(id: CommentId) -> DomainError {
    DomainError::new(
        ErrorCode::CommentNotFound,
        format!("Comment not found: {}", id),
    )
}

fn row_to_comment(row: sqlx::postgres::PgRow) -> Result<Comment, DomainError> {
    let vote_type: String = row.get("vote_type");
    let view_status: String = row.get("view_status");
    let parent_id: Option<i64> = row.get("parent_id");

    Ok(Comment::reconstitute(
        CommentId::new(row.get("id")),
        DiscussionId::new(row.get("discussion_id")),
        MemberId::new(row.get("author_id")),
        parent_id.map(CommentId::new),
        parse_vote_type(&vote_type)?,
        row.get("content"),
        row.get::<i32, _>("like_count") as u32,
        row.get::<i32, _>("dislike_count") as u32,
        str_to_view_status(&view_status)?,
        Timestamp::from_datetime(row.get("created_at")),
    ))
}
