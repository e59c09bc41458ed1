//! Route configuration for discussion endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    cast_vote, get_discussion, list_discussions, record_view, register_discussion,
    update_discussion, DiscussionAppState,
};

/// Creates the discussion router with all endpoints.
///
/// Routes:
/// - `POST /api/discussions` - Register a debate
/// - `GET /api/discussions` - Scroll the board (status/keyword filters)
/// - `GET /api/discussions/:id` - Detail with viewer flags
/// - `PUT /api/discussions/:id` - Update a Waiting debate
/// - `POST /api/discussions/:id/views` - View beacon
/// - `POST /api/discussions/:id/vote` - Cast a vote
pub fn discussion_router() -> Router<DiscussionAppState> {
    Router::new()
        .route(
            "/api/discussions",
            post(register_discussion).get(list_discussions),
        )
        .route(
            "/api/discussions/:id",
            get(get_discussion).put(update_discussion),
        )
        .route("/api/discussions/:id/views", post(record_view))
        .route("/api/discussions/:id/vote", post(cast_vote))
}
