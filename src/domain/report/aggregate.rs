//! Report aggregate and moderation target types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{MemberId, ReportId, StateMachine, Timestamp};

use super::ReportError;

/// Maximum length for a report reason.
pub const MAX_REASON_LENGTH: usize = 500;

/// How many active reports on one target trigger auto-escalation.
pub const ESCALATION_THRESHOLD: u32 = 3;

/// Kind of content a report points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetKind {
    Discussion,
    Comment,
}

impl TargetKind {
    /// Stable string form used by persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Discussion => "DISCUSSION",
            TargetKind::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DISCUSSION" => Ok(TargetKind::Discussion),
            "COMMENT" => Ok(TargetKind::Comment),
            other => Err(format!("Unknown target kind: {}", other)),
        }
    }
}

/// Polymorphic reference to reportable content.
///
/// Deliberately narrow: the moderation engine only needs owner lookup and
/// view-status control over a target, never the target's full shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportTarget {
    pub kind: TargetKind,
    pub id: i64,
}

impl ReportTarget {
    pub fn discussion(id: i64) -> Self {
        Self {
            kind: TargetKind::Discussion,
            id,
        }
    }

    pub fn comment(id: i64) -> Self {
        Self {
            kind: TargetKind::Comment,
            id,
        }
    }
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Moderation status of a report.
///
/// `Pending` reports escalate to `TemporaryAccepted` automatically when
/// the active-report threshold on their target is reached. Admin review
/// finishes the walk at `Accepted` or `Rejected`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    TemporaryAccepted,
    Accepted,
    Rejected,
}

impl StateMachine for ReportStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReportStatus::*;
        matches!(
            (self, target),
            (Pending, TemporaryAccepted)
                | (Pending, Accepted)
                | (Pending, Rejected)
                | (TemporaryAccepted, Accepted)
                | (TemporaryAccepted, Rejected)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReportStatus::*;
        match self {
            Pending => vec![TemporaryAccepted, Accepted, Rejected],
            TemporaryAccepted => vec![Accepted, Rejected],
            Accepted | Rejected => vec![],
        }
    }
}

impl ReportStatus {
    /// Stable string form used by persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::TemporaryAccepted => "TEMPORARY_ACCEPTED",
            ReportStatus::Accepted => "ACCEPTED",
            ReportStatus::Rejected => "REJECTED",
        }
    }

    /// Active reports hold or could hold a block on their target.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ReportStatus::Pending | ReportStatus::TemporaryAccepted | ReportStatus::Accepted
        )
    }

    /// Reports still awaiting an admin decision. Only these count toward
    /// the escalation threshold; an accepted report blocks its reporter
    /// from re-filing but adds no further escalation weight.
    pub fn is_undecided(&self) -> bool {
        matches!(
            self,
            ReportStatus::Pending | ReportStatus::TemporaryAccepted
        )
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ReportStatus::Pending),
            "TEMPORARY_ACCEPTED" => Ok(ReportStatus::TemporaryAccepted),
            "ACCEPTED" => Ok(ReportStatus::Accepted),
            "REJECTED" => Ok(ReportStatus::Rejected),
            other => Err(format!("Unknown report status: {}", other)),
        }
    }
}

/// Admin decision on a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewDecision {
    Accept,
    Reject,
}

/// Report aggregate - one member reporting one piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    id: ReportId,

    /// Member who filed the report.
    reporter_id: MemberId,

    /// Owner of the reported content.
    reported_id: MemberId,

    target: ReportTarget,
    reason: String,
    status: ReportStatus,
    created_at: Timestamp,
}

impl Report {
    /// Files a new report in the Pending state.
    ///
    /// Uniqueness of active reports per (reporter, target) is enforced at
    /// the persistence layer.
    ///
    /// # Errors
    ///
    /// - `SelfReport` if the reporter owns the target
    /// - `ValidationFailed` if reason is empty or too long
    pub fn submit(
        id: ReportId,
        reporter_id: MemberId,
        reported_id: MemberId,
        target: ReportTarget,
        reason: String,
        created_at: Timestamp,
    ) -> Result<Self, ReportError> {
        if reporter_id == reported_id {
            return Err(ReportError::self_report());
        }
        if reason.trim().is_empty() {
            return Err(ReportError::validation("reason", "cannot be empty"));
        }
        if reason.chars().count() > MAX_REASON_LENGTH {
            return Err(ReportError::validation(
                "reason",
                format!("must be at most {} characters", MAX_REASON_LENGTH),
            ));
        }

        Ok(Self {
            id,
            reporter_id,
            reported_id,
            target,
            reason,
            status: ReportStatus::Pending,
            created_at,
        })
    }

    /// Reconstitute a report from persistence (no validation).
    pub fn reconstitute(
        id: ReportId,
        reporter_id: MemberId,
        reported_id: MemberId,
        target: ReportTarget,
        reason: String,
        status: ReportStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            reporter_id,
            reported_id,
            target,
            reason,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn reporter_id(&self) -> MemberId {
        self.reporter_id
    }

    pub fn reported_id(&self) -> MemberId {
        self.reported_id
    }

    pub fn target(&self) -> ReportTarget {
        self.target
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn status(&self) -> ReportStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Threshold escalation: Pending -> TemporaryAccepted.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless status is Pending
    pub fn escalate(&mut self) -> Result<(), ReportError> {
        self.status = self
            .status
            .transition_to(ReportStatus::TemporaryAccepted)
            .map_err(|_| ReportError::invalid_state(self.status))?;
        Ok(())
    }

    /// Admin review: finishes the walk at Accepted or Rejected.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the report was already reviewed
    pub fn review(&mut self, decision: ReviewDecision) -> Result<(), ReportError> {
        let next = match decision {
            ReviewDecision::Accept => ReportStatus::Accepted,
            ReviewDecision::Reject => ReportStatus::Rejected,
        };
        self.status = self
            .status
            .transition_to(next)
            .map_err(|_| ReportError::invalid_state(self.status))?;
        Ok(())
    }
}
