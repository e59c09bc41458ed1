//! PostgreSQL implementation of ReactionRepository.
//!
//! One reaction per member per comment, enforced by the unique
//! constraint on `(comment_id, member_id)`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{CommentId, DomainError, ErrorCode, MemberId};
use crate::domain::vote::{Reaction, ReactionKind};
use crate::ports::ReactionRepository;

use super::discussion_repository::db_error;
use super::participant_repository::is_unique_violation;

/// PostgreSQL implementation of ReactionRepository.
#[derive(Clone)]
pub struct PostgresReactionRepository {
    pool: PgPool,
}

impl PostgresReactionRepository {
    /// Creates a new PostgresReactionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PostgresReactionRepository {
    async fn insert(&self, reaction: &Reaction) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reactions (comment_id, member_id, kind, reacted_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(reaction.comment_id().value())
        .bind(reaction.member_id().value())
        .bind(reaction.kind().as_str())
        .bind(reaction.reacted_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::DuplicateReaction,
                    format!(
                        "Member {} already reacted to comment {}",
                        reaction.member_id(),
                        reaction.comment_id()
                    ),
                )
            } else {
                db_error(format!("Failed to insert reaction: {}", e))
            }
        })?;

        Ok(())
    }

    async fn find_reaction(
        &self,
        comment_id: CommentId,
        member_id: MemberId,
    ) -> Result<Option<ReactionKind>, DomainError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT kind FROM reactions WHERE comment_id = $1 AND member_id = $2",
        )
        .bind(comment_id.value())
        .bind(member_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to fetch reaction: {}", e)))?;

        row.map(|(s,)| parse_reaction_kind(&s)).transpose()
    }
}

fn parse_reaction_kind(s: &str) -> Result<ReactionKind, DomainError> {
    s.parse()
        .map_err(|e: String| DomainError::new(ErrorCode::InvalidFormat, e))
}
