//! Report repository port, including the escalation contract.
//!
//! # Design
//!
//! The two multi-row moderation decisions are pushed down here so they
//! can run atomically (one transaction / one lock):
//!
//! - `escalate_if_threshold`: count active reports on a target and, when
//!   the threshold is met *and* the target is still visible, flip every
//!   Pending report to TemporaryAccepted and block the target. The
//!   view-status transition is the gate, so escalation fires exactly
//!   once per target no matter how many reports race in.
//! - `reject_and_maybe_unblock`: reject one report and revert the target
//!   to Normal when no Accepted/TemporaryAccepted report remains.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId, ReportId};
use crate::domain::report::{Report, ReportStatus, ReportTarget};

/// Repository port for Report persistence and moderation decisions.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Reserve the next report id.
    async fn next_id(&self) -> Result<ReportId, DomainError>;

    /// Save a new report.
    ///
    /// # Errors
    ///
    /// - `DuplicateReport` if the reporter already holds an active
    ///   (Pending/TemporaryAccepted/Accepted) report on this target
    /// - `DatabaseError` on persistence failure
    async fn save(&self, report: &Report) -> Result<(), DomainError>;

    /// Find a report by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: ReportId) -> Result<Option<Report>, DomainError>;

    /// Whether the reporter holds an active report on the target.
    async fn exists_active(
        &self,
        target: ReportTarget,
        reporter_id: MemberId,
    ) -> Result<bool, DomainError>;

    /// Atomic threshold escalation.
    ///
    /// Returns `Some(active_count)` when escalation fired (the target
    /// was blocked by this call), `None` when the threshold was not met
    /// or the target was already blocked.
    async fn escalate_if_threshold(
        &self,
        target: ReportTarget,
        threshold: u32,
    ) -> Result<Option<u32>, DomainError>;

    /// Persist a status change decided by the domain.
    ///
    /// # Errors
    ///
    /// - `ReportNotFound` if the report doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn set_status(&self, id: ReportId, status: ReportStatus) -> Result<(), DomainError>;

    /// Atomic rejection with conditional unblock.
    ///
    /// Sets the report Rejected and, when no Accepted/TemporaryAccepted
    /// report remains on the target, reverts the target's view status to
    /// Normal. Returns whether the target was unblocked.
    ///
    /// # Errors
    ///
    /// - `ReportNotFound` if the report doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn reject_and_maybe_unblock(&self, id: ReportId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn report_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ReportRepository) {}
    }
}
