//! Discussion repository port (write side).
//!
//! # Design
//!
//! - **Write-focused**: aggregate persistence plus the narrow atomic
//!   operations the lifecycle needs (CAS transition, counter bumps)
//! - **Monotone ids**: `next_id` hands out increasing ids so cursor
//!   pagination can key on them

use async_trait::async_trait;

use crate::domain::discussion::{AnalysisVerdict, Discussion, DiscussionStatus};
use crate::domain::foundation::{DiscussionId, DomainError, Timestamp, ViewStatus};
use crate::domain::vote::VoteType;

/// Repository port for Discussion aggregate persistence.
#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    /// Reserve the next discussion id.
    async fn next_id(&self) -> Result<DiscussionId, DomainError>;

    /// Save a new discussion.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, discussion: &Discussion) -> Result<(), DomainError>;

    /// Update an existing discussion.
    ///
    /// # Errors
    ///
    /// - `DiscussionNotFound` if the discussion doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, discussion: &Discussion) -> Result<(), DomainError>;

    /// Find a discussion by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: DiscussionId) -> Result<Option<Discussion>, DomainError>;

    /// Compare-and-set status transition.
    ///
    /// Atomically moves the discussion from `expected` to `next` and
    /// returns whether the swap happened. A `false` return means the
    /// discussion was not in `expected` (already transitioned); callers
    /// treat that as an absorbed duplicate trigger, not an error.
    ///
    /// # Errors
    ///
    /// - `DiscussionNotFound` if the discussion doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn transition_status(
        &self,
        id: DiscussionId,
        expected: DiscussionStatus,
        next: DiscussionStatus,
    ) -> Result<bool, DomainError>;

    /// Persist the analysis outcome and close the discussion.
    ///
    /// Performed as one write: verdict fields, `closed_at`, and the
    /// Analyzing -> Closed transition.
    ///
    /// # Errors
    ///
    /// - `DiscussionNotFound` if the discussion doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn apply_analysis(
        &self,
        id: DiscussionId,
        verdict: &AnalysisVerdict,
        closed_at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Increment the view counter.
    ///
    /// Relaxed: concurrent increments may interleave freely, the counter
    /// only ever grows.
    async fn increment_views(&self, id: DiscussionId) -> Result<(), DomainError>;

    /// Increment the agree or disagree counter by one.
    async fn increment_vote_count(
        &self,
        id: DiscussionId,
        vote_type: VoteType,
    ) -> Result<(), DomainError>;

    /// Set the moderation visibility flag.
    async fn set_view_status(
        &self,
        id: DiscussionId,
        view_status: ViewStatus,
    ) -> Result<(), DomainError>;
}
