//! Report domain module.
//!
//! Members report discussions or comments; three active reports on one
//! target auto-escalate every pending report to TemporaryAccepted and
//! block the target. Admin review finishes each report at Accepted or
//! Rejected, unblocking the target when no accepting report remains.
//!
//! # Events
//!
//! - `ReportSubmitted` - Published when a report is filed
//! - `TargetBlocked` - Published when threshold escalation fires
//! - `ReportReviewed` - Published when an admin decides a report

mod aggregate;
mod errors;
mod events;

pub use aggregate::{
    Report, ReportStatus, ReportTarget, ReviewDecision, TargetKind, ESCALATION_THRESHOLD,
    MAX_REASON_LENGTH,
};
pub use errors::ReportError;
pub use events::{ReportReviewed, ReportSubmitted, TargetBlocked};
