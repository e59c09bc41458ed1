//! Report-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ReportId};

use super::{ReportStatus, ReportTarget};

/// Report-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Report was not found.
    NotFound(ReportId),
    /// Reported content was not found.
    TargetNotFound(ReportTarget),
    /// Members cannot report their own content.
    SelfReport,
    /// Reporter already holds an active report on this target.
    DuplicateReport { target: ReportTarget },
    /// Review attempted on an already-reviewed report.
    InvalidState { current: ReportStatus },
    /// Caller lacks the admin role.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ReportError {
    pub fn not_found(id: ReportId) -> Self {
        ReportError::NotFound(id)
    }

    pub fn target_not_found(target: ReportTarget) -> Self {
        ReportError::TargetNotFound(target)
    }

    pub fn self_report() -> Self {
        ReportError::SelfReport
    }

    pub fn duplicate_report(target: ReportTarget) -> Self {
        ReportError::DuplicateReport { target }
    }

    pub fn invalid_state(current: ReportStatus) -> Self {
        ReportError::InvalidState { current }
    }

    pub fn forbidden() -> Self {
        ReportError::Forbidden
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReportError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReportError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReportError::NotFound(_) => ErrorCode::ReportNotFound,
            ReportError::TargetNotFound(target) => match target.kind {
                super::TargetKind::Discussion => ErrorCode::DiscussionNotFound,
                super::TargetKind::Comment => ErrorCode::CommentNotFound,
            },
            ReportError::SelfReport => ErrorCode::SelfReport,
            ReportError::DuplicateReport { .. } => ErrorCode::DuplicateReport,
            ReportError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            ReportError::Forbidden => ErrorCode::Forbidden,
            ReportError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReportError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReportError::NotFound(id) => format!("Report not found: {}", id),
            ReportError::TargetNotFound(target) => {
                format!("Reported content not found: {}", target)
            }
            ReportError::SelfReport => "Cannot report your own content".to_string(),
            ReportError::DuplicateReport { target } => {
                format!("An active report on {} already exists", target)
            }
            ReportError::InvalidState { current } => {
                format!("Report was already reviewed (status {})", current)
            }
            ReportError::Forbidden => "Admin role required".to_string(),
            ReportError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReportError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReportError {}

impl From<DomainError> for ReportError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => ReportError::Forbidden,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ReportError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => ReportError::Infrastructure(err.to_string()),
        }
    }
}
