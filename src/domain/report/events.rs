//! Report domain events.
//!
//! - `ReportSubmitted` - A report was filed against content
//! - `TargetBlocked` - Threshold escalation blocked a target
//! - `ReportReviewed` - An admin finished reviewing a report

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, MemberId, ReportId, Timestamp};

use super::{ReportTarget, ReviewDecision};

/// Published when a member files a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSubmitted {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the new report.
    pub report_id: ReportId,

    /// Member who filed the report.
    pub reporter_id: MemberId,

    /// Content the report points at.
    pub target: ReportTarget,

    /// When the report was filed.
    pub submitted_at: Timestamp,
}

domain_event!(
    ReportSubmitted,
    event_type = "report.submitted",
    aggregate_id = report_id,
    aggregate_type = "Report",
    occurred_at = submitted_at,
    event_id = event_id
);

/// Published when threshold escalation blocks a target.
///
/// Fires at most once per target: escalation is gated on the target's
/// view status flipping Normal to Blocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetBlocked {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Report whose submission tipped the threshold.
    pub report_id: ReportId,

    /// Content that was blocked.
    pub target: ReportTarget,

    /// Number of active reports at the moment of escalation.
    pub active_reports: u32,

    /// When the block was applied.
    pub blocked_at: Timestamp,
}

domain_event!(
    TargetBlocked,
    event_type = "report.target_blocked",
    aggregate_id = report_id,
    aggregate_type = "Report",
    occurred_at = blocked_at,
    event_id = event_id
);

/// Published when an admin finishes reviewing a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportReviewed {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the reviewed report.
    pub report_id: ReportId,

    /// Admin who made the decision.
    pub reviewer_id: MemberId,

    /// The decision taken.
    pub decision: ReviewDecision,

    /// Whether the target's view status reverted to Normal.
    pub target_unblocked: bool,

    /// When the review happened.
    pub reviewed_at: Timestamp,
}

domain_event!(
    ReportReviewed,
    event_type = "report.reviewed",
    aggregate_id = report_id,
    aggregate_type = "Report",
    occurred_at = reviewed_at,
    event_id = event_id
);
