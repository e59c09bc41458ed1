//! HTTP handlers for comment endpoints.
//!
//! Posting and listing the flattened thread of one debate, plus
//! like/dislike reactions on individual comments.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::comment::{
    ListCommentsHandler, PostCommentCommand, PostCommentHandler,
};
use crate::application::handlers::vote::{CastReactionCommand, CastReactionHandler};
use crate::domain::comment::CommentError;
use crate::domain::foundation::{
    CommandMetadata, CommentId, DiscussionId, ErrorCode, ScrollQuery,
};
use crate::domain::vote::VoteError;
use crate::ports::{CommentReader, CommentRepository, DiscussionRepository, ReactionRepository};

use super::super::error::{status_for, ErrorResponse};
use super::super::middleware::RequireAuth;
use super::dto::{
    CastReactionRequest, CommentCommandResponse, ListCommentsQuery, PostCommentRequest,
    ThreadEntryResponse,
};
use crate::adapters::http::discussion::dto::ScrollResponse;

const DEFAULT_PAGE_SIZE: u32 = 20;

// ════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════

/// Shared application state containing all comment dependencies.
#[derive(Clone)]
pub struct CommentAppState {
    pub comment_repository: Arc<dyn CommentRepository>,
    pub comment_reader: Arc<dyn CommentReader>,
    pub discussion_repository: Arc<dyn DiscussionRepository>,
    pub reaction_repository: Arc<dyn ReactionRepository>,
}

impl CommentAppState {
    pub fn post_handler(&self) -> PostCommentHandler {
        PostCommentHandler::new(
            self.comment_repository.clone(),
            self.discussion_repository.clone(),
        )
    }

    pub fn list_handler(&self) -> ListCommentsHandler {
        ListCommentsHandler::new(
            self.comment_reader.clone(),
            self.discussion_repository.clone(),
        )
    }

    pub fn cast_reaction_handler(&self) -> CastReactionHandler {
        CastReactionHandler::new(
            self.reaction_repository.clone(),
            self.comment_repository.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════

/// POST /api/discussions/:id/comments - Post a comment or reply
pub async fn post_comment(
    State(state): State<CommentAppState>,
    Path(discussion_id): Path<i64>,
    RequireAuth(member): RequireAuth,
    Json(request): Json<PostCommentRequest>,
) -> Result<impl IntoResponse, CommentApiError> {
    let handler = state.post_handler();
    let cmd = PostCommentCommand {
        discussion_id: DiscussionId::new(discussion_id),
        parent_id: request.parent_id.map(CommentId::new),
        vote_type: request.vote_type,
        content: request.content,
    };
    let metadata = CommandMetadata::new(member.id).with_source("api");

    let comment = handler.handle(cmd, metadata).await?;

    let response = CommentCommandResponse {
        comment_id: comment.id().value(),
        message: "Comment posted".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/discussions/:id/comments - Scroll the flattened thread
pub async fn list_comments(
    State(state): State<CommentAppState>,
    Path(discussion_id): Path<i64>,
    Query(query): Query<ListCommentsQuery>,
) -> Result<impl IntoResponse, CommentApiError> {
    let scroll = ScrollQuery::new(
        query.last_id.unwrap_or(0),
        query.size.unwrap_or(DEFAULT_PAGE_SIZE),
    );

    let page = state
        .list_handler()
        .handle(DiscussionId::new(discussion_id), scroll)
        .await?;
    let response: ScrollResponse<ThreadEntryResponse> = page.into();

    Ok((StatusCode::OK, Json(response)))
}

/// POST /api/comments/:id/reaction - React to a comment
pub async fn cast_reaction(
    State(state): State<CommentAppState>,
    Path(comment_id): Path<i64>,
    RequireAuth(member): RequireAuth,
    Json(request): Json<CastReactionRequest>,
) -> Result<impl IntoResponse, CommentApiError> {
    let handler = state.cast_reaction_handler();
    let cmd = CastReactionCommand {
        comment_id: CommentId::new(comment_id),
        kind: request.kind,
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
pub struct CommentApiError {
    code: ErrorCode,
    message: String,
}

impl From<CommentError> for CommentApiError {
    fn from(err: CommentError) -> Self {
        Self {
            code: err.code(),
            message: err.message(),
        }
    }
}

impl From<VoteError> for CommentApiError {
    fn from(err: VoteError) -> Self {
        Self {
            code: err.code(),
            message: err.message(),
        }
    }
}

impl IntoResponse for CommentApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for(self.code);
        let body = ErrorResponse::new(self.code, self.message);
        (status, Json(body)).into_response()
    }
}
