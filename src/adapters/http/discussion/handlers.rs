//! HTTP handlers for discussion endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers: register/update a debate, list/detail queries, and voting.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::discussion::{
    GetDiscussionHandler, ListDiscussionsHandler, RecordViewHandler, RegisterDiscussionCommand,
    RegisterDiscussionHandler, UpdateDiscussionCommand, UpdateDiscussionHandler,
};
use crate::application::handlers::vote::{CastVoteCommand, CastVoteHandler};
use crate::domain::discussion::{DebatePolicy, DiscussionError, DiscussionStatus};
use crate::domain::foundation::{
    CommandMetadata, DiscussionId, ErrorCode, ScrollQuery, Timestamp,
};
use crate::domain::vote::VoteError;
use crate::ports::{
    BookCatalog, DiscussionFilter, DiscussionReader, DiscussionRepository, EventPublisher,
    ParticipantRepository, TriggerScheduler,
};

use super::super::error::{status_for, ErrorResponse};
use super::super::middleware::{OptionalAuth, RequireAuth};
use super::dto::{
    CastVoteRequest, DiscussionCommandResponse, DiscussionDetailResponse,
    DiscussionSummaryResponse, ListDiscussionsQuery, RegisterDiscussionRequest, ScrollResponse,
    UpdateDiscussionRequest,
};

const DEFAULT_PAGE_SIZE: u32 = 20;

// ════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════

/// Shared application state containing all discussion dependencies.
#[derive(Clone)]
pub struct DiscussionAppState {
    pub discussion_repository: Arc<dyn DiscussionRepository>,
    pub discussion_reader: Arc<dyn DiscussionReader>,
    pub participant_repository: Arc<dyn ParticipantRepository>,
    pub catalog: Arc<dyn BookCatalog>,
    pub scheduler: Arc<dyn TriggerScheduler>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub policy: DebatePolicy,
}

impl DiscussionAppState {
    pub fn register_handler(&self) -> RegisterDiscussionHandler {
        RegisterDiscussionHandler::new(
            self.discussion_repository.clone(),
            self.catalog.clone(),
            self.scheduler.clone(),
            self.event_publisher.clone(),
            self.policy,
        )
    }

    pub fn update_handler(&self) -> UpdateDiscussionHandler {
        UpdateDiscussionHandler::new(
            self.discussion_repository.clone(),
            self.scheduler.clone(),
            self.policy,
        )
    }

    pub fn get_handler(&self) -> GetDiscussionHandler {
        GetDiscussionHandler::new(
            self.discussion_reader.clone(),
            self.discussion_repository.clone(),
        )
    }

    pub fn list_handler(&self) -> ListDiscussionsHandler {
        ListDiscussionsHandler::new(self.discussion_reader.clone())
    }

    pub fn record_view_handler(&self) -> RecordViewHandler {
        RecordViewHandler::new(self.discussion_repository.clone())
    }

    pub fn cast_vote_handler(&self) -> CastVoteHandler {
        CastVoteHandler::new(
            self.participant_repository.clone(),
            self.discussion_repository.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════

/// POST /api/discussions - Register a new debate
pub async fn register_discussion(
    State(state): State<DiscussionAppState>,
    RequireAuth(member): RequireAuth,
    Json(request): Json<RegisterDiscussionRequest>,
) -> Result<impl IntoResponse, DiscussionApiError> {
    let handler = state.register_handler();
    let cmd = RegisterDiscussionCommand {
        isbn: request.isbn,
        title: request.title,
        content: request.content,
        start_date: Timestamp::from_datetime(request.start_date),
    };
    let metadata = CommandMetadata::new(member.id).with_source("api");

    let result = handler.handle(cmd, metadata).await?;

    let response = DiscussionCommandResponse {
        discussion_id: result.discussion.id().value(),
        message: "Debate registered".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/discussions/:id - Update a Waiting debate
pub async fn update_discussion(
    State(state): State<DiscussionAppState>,
    Path(id): Path<i64>,
    RequireAuth(member): RequireAuth,
    Json(request): Json<UpdateDiscussionRequest>,
) -> Result<impl IntoResponse, DiscussionApiError> {
    let handler = state.update_handler();
    let cmd = UpdateDiscussionCommand {
        discussion_id: DiscussionId::new(id),
        title: request.title,
        content: request.content,
        start_date: Timestamp::from_datetime(request.start_date),
    };
    let metadata = CommandMetadata::new(member.id).with_source("api");

    let discussion = handler.handle(cmd, metadata).await?;

    let response = DiscussionCommandResponse {
        discussion_id: discussion.id().value(),
        message: "Debate updated".to_string(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/discussions - Scroll the debate board
pub async fn list_discussions(
    State(state): State<DiscussionAppState>,
    Query(query): Query<ListDiscussionsQuery>,
) -> Result<impl IntoResponse, DiscussionApiError> {
    let mut filter = DiscussionFilter::default();
    if let Some(status) = query.status.as_deref() {
        let status: DiscussionStatus = status.parse().map_err(|e: String| {
            DiscussionApiError::new(ErrorCode::InvalidFormat, e)
        })?;
        filter = filter.with_status(status);
    }
    if let Some(keyword) = query.keyword {
        filter = filter.with_keyword(keyword);
    }

    let scroll = ScrollQuery::new(
        query.last_id.unwrap_or(0),
        query.size.unwrap_or(DEFAULT_PAGE_SIZE),
    );

    let page = state.list_handler().handle(filter, scroll).await?;
    let response: ScrollResponse<DiscussionSummaryResponse> = page.into();

    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/discussions/:id - Debate detail with viewer flags
pub async fn get_discussion(
    State(state): State<DiscussionAppState>,
    Path(id): Path<i64>,
    OptionalAuth(viewer): OptionalAuth,
) -> Result<impl IntoResponse, DiscussionApiError> {
    let handler = state.get_handler();
    let detail = handler
        .handle(DiscussionId::new(id), viewer.map(|m| m.id))
        .await?;

    Ok((StatusCode::OK, Json(DiscussionDetailResponse::from(detail))))
}

/// POST /api/discussions/:id/views - View beacon (no body)
pub async fn record_view(
    State(state): State<DiscussionAppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, DiscussionApiError> {
    state
        .record_view_handler()
        .handle(DiscussionId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/discussions/:id/vote - Cast an agree/disagree vote
pub async fn cast_vote(
    State(state): State<DiscussionAppState>,
    Path(id): Path<i64>,
    RequireAuth(member): RequireAuth,
    Json(request): Json<CastVoteRequest>,
) -> Result<impl IntoResponse, DiscussionApiError> {
    let handler = state.cast_vote_handler();
    let cmd = CastVoteCommand {
        discussion_id: DiscussionId::new(id),
        vote_type: request.vote_type,
    };
    let metadata = CommandMetadata::new(member.id).with_source("api");

    handler.handle(cmd, metadata).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct DiscussionApiError {
    code: ErrorCode,
    message: String,
}

impl DiscussionApiError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<DiscussionError> for DiscussionApiError {
    fn from(err: DiscussionError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<VoteError> for DiscussionApiError {
    fn from(err: VoteError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl IntoResponse for DiscussionApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for(self.code);
        let body = ErrorResponse::new(self.code, self.message);
        (status, Json(body)).into_response()
    }
}
