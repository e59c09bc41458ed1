//! PostgreSQL implementation of ParticipantRepository.
//!
//! The one-vote-per-member rule is enforced by the unique constraint on
//! `(discussion_id, member_id)`; a violation maps to `DuplicateVote`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DiscussionId, DomainError, ErrorCode, MemberId};
use crate::domain::vote::{Participant, VoteType};
use crate::ports::ParticipantRepository;

use super::discussion_reader::parse_vote_type;
use super::discussion_repository::db_error;

/// PostgreSQL implementation of ParticipantRepository.
#[derive(Clone)]
pub struct PostgresParticipantRepository {
    pool: PgPool,
}

impl PostgresParticipantRepository {
    /// Creates a new PostgresParticipantRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    async fn insert(&self, participant: &Participant) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO participants (discussion_id, member_id, vote_type, voted_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(participant.discussion_id().value())
        .bind(participant.member_id().value())
        .bind(participant.vote_type().as_str())
        .bind(participant.voted_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::DuplicateVote,
                    format!(
                        "Member {} already voted on discussion {}",
                        participant.member_id(),
                        participant.discussion_id()
                    ),
                )
            } else {
                db_error(format!("Failed to insert vote: {}", e))
            }
        })?;

        Ok(())
    }

    async fn find_vote(
        &self,
        discussion_id: DiscussionId,
        member_id: MemberId,
    ) -> Result<Option<VoteType>, DomainError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT vote_type FROM participants WHERE discussion_id = $1 AND member_id = $2",
        )
        .bind(discussion_id.value())
        .bind(member_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(format!("Failed to fetch vote: {}", e)))?;

        row.map(|(s,)| parse_vote_type(&s)).transpose()
    }
}

pub(super) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
