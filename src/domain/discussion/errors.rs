//! Discussion-specific error types.

use crate::domain::foundation::{DiscussionId, DomainError, ErrorCode};

use super::DiscussionStatus;

/// Discussion-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscussionError {
    /// Discussion was not found.
    NotFound(DiscussionId),
    /// Book lookup failed for the given ISBN.
    BookNotFound(String),
    /// Caller is not the author (or lacks the required role).
    Forbidden,
    /// Start date falls outside the allowed registration window.
    SchedulingWindow {
        min_hours: i64,
        max_hours: i64,
        actual_hours: i64,
    },
    /// Operation attempted from a disallowed lifecycle status.
    InvalidState { current: DiscussionStatus },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Timer registration or cancellation failed.
    Scheduler(String),
    /// Analysis provider failed; the discussion stays in Analyzing.
    Analysis(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl DiscussionError {
    pub fn not_found(id: DiscussionId) -> Self {
        DiscussionError::NotFound(id)
    }

    pub fn book_not_found(isbn: impl Into<String>) -> Self {
        DiscussionError::BookNotFound(isbn.into())
    }

    pub fn forbidden() -> Self {
        DiscussionError::Forbidden
    }

    pub fn scheduling_window(min_hours: i64, max_hours: i64, actual_hours: i64) -> Self {
        DiscussionError::SchedulingWindow {
            min_hours,
            max_hours,
            actual_hours,
        }
    }

    pub fn invalid_state(current: DiscussionStatus) -> Self {
        DiscussionError::InvalidState { current }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DiscussionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn scheduler(message: impl Into<String>) -> Self {
        DiscussionError::Scheduler(message.into())
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        DiscussionError::Analysis(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DiscussionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DiscussionError::NotFound(_) => ErrorCode::DiscussionNotFound,
            DiscussionError::BookNotFound(_) => ErrorCode::BookNotFound,
            DiscussionError::Forbidden => ErrorCode::Forbidden,
            DiscussionError::SchedulingWindow { .. } => ErrorCode::SchedulingWindowViolation,
            DiscussionError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            DiscussionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DiscussionError::Scheduler(_) => ErrorCode::SchedulerError,
            DiscussionError::Analysis(_) => ErrorCode::AnalysisProviderError,
            DiscussionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DiscussionError::NotFound(id) => format!("Discussion not found: {}", id),
            DiscussionError::BookNotFound(isbn) => format!("Book not found for ISBN: {}", isbn),
            DiscussionError::Forbidden => "Permission denied".to_string(),
            DiscussionError::SchedulingWindow {
                min_hours,
                max_hours,
                actual_hours,
            } => format!(
                "Start date must be between {}h and {}h from now, got {}h",
                min_hours, max_hours, actual_hours
            ),
            DiscussionError::InvalidState { current } => {
                format!("Operation not allowed while discussion is {}", current)
            }
            DiscussionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            DiscussionError::Scheduler(msg) => format!("Scheduler error: {}", msg),
            DiscussionError::Analysis(msg) => format!("Analysis failed: {}", msg),
            DiscussionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for DiscussionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DiscussionError {}

impl From<DomainError> for DiscussionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DiscussionNotFound => DiscussionError::Infrastructure(err.to_string()),
            ErrorCode::BookNotFound => DiscussionError::BookNotFound(
                err.details.get("isbn").cloned().unwrap_or_default(),
            ),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => DiscussionError::Forbidden,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => DiscussionError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::SchedulerError => DiscussionError::Scheduler(err.message),
            ErrorCode::AnalysisProviderError => DiscussionError::Analysis(err.message),
            _ => DiscussionError::Infrastructure(err.to_string()),
        }
    }
}
