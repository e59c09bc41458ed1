//! HTTP DTOs for report endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::report::{ReportStatus, ReviewDecision, TargetKind};

// ════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════

/// Request to report a discussion or comment.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReportRequest {
    /// DISCUSSION or COMMENT.
    pub target_kind: TargetKind,
    pub target_id: i64,
    pub reason: String,
}

/// Request to review a report (admin only).
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewReportRequest {
    /// ACCEPT or REJECT.
    pub decision: ReviewDecision,
}

// ════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════

/// Response after filing a report.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReportResponse {
    pub report_id: i64,
    pub status: ReportStatus,
    /// Whether this submission tipped the threshold and blocked the target.
    pub target_blocked: bool,
}

/// Response after an admin review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewReportResponse {
    pub report_id: i64,
    pub status: ReportStatus,
    /// Whether the rejection reverted the target to Normal.
    pub target_unblocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_deserializes() {
        let json = r#"{"target_kind": "COMMENT", "target_id": 5, "reason": "spam"}"#;
        let req: SubmitReportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.target_kind, TargetKind::Comment);
        assert_eq!(req.target_id, 5);
    }

    #[test]
    fn review_request_deserializes() {
        let req: ReviewReportRequest =
            serde_json::from_str(r#"{"decision": "REJECT"}"#).unwrap();
        assert_eq!(req.decision, ReviewDecision::Reject);
    }
}
