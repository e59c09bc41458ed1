//! Shared HTTP error envelope and status mapping.
//!
//! Every context's API error renders as the same JSON shape:
//! `{ "code": "...", "message": "..." }`, with the status derived from
//! the domain error code.

use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::foundation::ErrorCode;

/// Error payload returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Maps a domain error code to its HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::SchedulingWindowViolation => StatusCode::BAD_REQUEST,

        ErrorCode::DiscussionNotFound
        | ErrorCode::CommentNotFound
        | ErrorCode::ReportNotFound
        | ErrorCode::BookNotFound => StatusCode::NOT_FOUND,

        ErrorCode::InvalidStateTransition
        | ErrorCode::DuplicateVote
        | ErrorCode::DuplicateReaction
        | ErrorCode::DuplicateReport
        | ErrorCode::SelfReport => StatusCode::CONFLICT,

        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::AnalysisProviderError => StatusCode::BAD_GATEWAY,

        ErrorCode::SchedulerError | ErrorCode::DatabaseError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
