//! Target directory port - narrow capability over reportable content.
//!
//! The moderation engine is polymorphic over discussions and comments
//! but only ever needs two things from a target: who owns it, and
//! control of its view status. No shared base type, just this port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId, ViewStatus};
use crate::domain::report::ReportTarget;

/// Narrow lookup/control surface over reportable content.
#[async_trait]
pub trait TargetDirectory: Send + Sync {
    /// Owner of the target.
    ///
    /// Returns `None` when the target doesn't exist.
    async fn owner_of(&self, target: ReportTarget) -> Result<Option<MemberId>, DomainError>;

    /// Current view status of the target.
    ///
    /// Returns `None` when the target doesn't exist.
    async fn view_status_of(&self, target: ReportTarget)
        -> Result<Option<ViewStatus>, DomainError>;

    /// Set the target's view status.
    ///
    /// # Errors
    ///
    /// - `DiscussionNotFound` / `CommentNotFound` if the target is gone
    async fn set_view_status(
        &self,
        target: ReportTarget,
        view_status: ViewStatus,
    ) -> Result<(), DomainError>;
}
