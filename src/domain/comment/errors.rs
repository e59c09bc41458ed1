//! Comment-specific error types.

use crate::domain::discussion::DiscussionStatus;
use crate::domain::foundation::{CommentId, DiscussionId, DomainError, ErrorCode};

/// Comment-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentError {
    /// Comment was not found (or belongs to another discussion).
    NotFound(CommentId),
    /// Discussion was not found.
    DiscussionNotFound(DiscussionId),
    /// Comments are only accepted while the debate is Ongoing.
    NotOngoing { current: DiscussionStatus },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl CommentError {
    pub fn not_found(id: CommentId) -> Self {
        CommentError::NotFound(id)
    }

    pub fn discussion_not_found(id: DiscussionId) -> Self {
        CommentError::DiscussionNotFound(id)
    }

    pub fn not_ongoing(current: DiscussionStatus) -> Self {
        CommentError::NotOngoing { current }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CommentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CommentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CommentError::NotFound(_) => ErrorCode::CommentNotFound,
            CommentError::DiscussionNotFound(_) => ErrorCode::DiscussionNotFound,
            CommentError::NotOngoing { .. } => ErrorCode::InvalidStateTransition,
            CommentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CommentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CommentError::NotFound(id) => format!("Comment not found: {}", id),
            CommentError::DiscussionNotFound(id) => format!("Discussion not found: {}", id),
            CommentError::NotOngoing { current } => format!(
                "Comments are only accepted while ONGOING, discussion is {}",
                current
            ),
            CommentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CommentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CommentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CommentError {}

impl From<DomainError> for CommentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => CommentError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => CommentError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ongoing_maps_to_state_transition_code() {
        let err = CommentError::not_ongoing(DiscussionStatus::Closed);
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert!(err.message().contains("CLOSED"));
    }

    #[test]
    fn not_found_names_the_comment() {
        let err = CommentError::not_found(CommentId::new(12));
        assert_eq!(err.code(), ErrorCode::CommentNotFound);
        assert!(err.message().contains("12"));
    }
}
