//! HTTP handlers for report endpoints.
//!
//! Filing reports against debates/comments and the admin review decision.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::report::{
    ReviewReportCommand, ReviewReportHandler, SubmitReportCommand, SubmitReportHandler,
};
use crate::domain::foundation::{CommandMetadata, ErrorCode, ReportId};
use crate::domain::report::{ReportError, ReportTarget};
use crate::ports::{EventPublisher, ReportRepository, TargetDirectory};

use super::super::error::{status_for, ErrorResponse};
use super::super::middleware::RequireAuth;
use super::dto::{
    ReviewReportRequest, ReviewReportResponse, SubmitReportRequest, SubmitReportResponse,
};

// ════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════

/// Shared application state containing all report dependencies.
#[derive(Clone)]
pub struct ReportAppState {
    pub report_repository: Arc<dyn ReportRepository>,
    pub target_directory: Arc<dyn TargetDirectory>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

impl ReportAppState {
    pub fn submit_handler(&self) -> SubmitReportHandler {
        SubmitReportHandler::new(
            self.report_repository.clone(),
            self.target_directory.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn review_handler(&self) -> ReviewReportHandler {
        ReviewReportHandler::new(
            self.report_repository.clone(),
            self.event_publisher.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════

/// POST /api/reports - File a report
pub async fn submit_report(
    State(state): State<ReportAppState>,
    RequireAuth(member): RequireAuth,
    Json(request): Json<SubmitReportRequest>,
) -> Result<impl IntoResponse, ReportApiError> {
    let handler = state.submit_handler();
    let cmd = SubmitReportCommand {
        target: ReportTarget {
            kind: request.target_kind,
            id: request.target_id,
        },
        reason: request.reason,
    };
    let metadata = CommandMetadata::new(member.id).with_source("api");

    let result = handler.handle(cmd, metadata).await?;

    let response = SubmitReportResponse {
        report_id: result.report.id().value(),
        status: result.report.status(),
        target_blocked: result.escalated.is_some(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/reports/:id/review - Admin decision on a report
pub async fn review_report(
    State(state): State<ReportAppState>,
    Path(id): Path<i64>,
    RequireAuth(member): RequireAuth,
    Json(request): Json<ReviewReportRequest>,
) -> Result<impl IntoResponse, ReportApiError> {
    let handler = state.review_handler();
    let cmd = ReviewReportCommand {
        report_id: ReportId::new(id),
        decision: request.decision,
    };
    let metadata = CommandMetadata::new(member.id).with_source("api");

    let result = handler.handle(cmd, member.clone(), metadata).await?;

    let response = ReviewReportResponse {
        report_id: result.report.id().value(),
        status: result.report.status(),
        target_unblocked: result.target_unblocked,
    };

    Ok((StatusCode::OK, Json(response)))
}

// ════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ReportApiError {
    code: ErrorCode,
    message: String,
}

impl From<ReportError> for ReportApiError {
    fn from(err: ReportError) -> Self {
        Self {
            code: err.code(),
            message: err.message(),
        }
    }
}

impl IntoResponse for ReportApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for(self.code);
        let body = ErrorResponse::new(self.code, self.message);
        (status, Json(body)).into_response()
    }
}
