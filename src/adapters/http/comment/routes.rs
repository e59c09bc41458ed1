//! Route configuration for comment endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{cast_reaction, list_comments, post_comment, CommentAppState};

/// Creates the comment router with all endpoints.
///
/// Routes:
/// - `POST /api/discussions/:id/comments` - Post a comment or reply
/// - `GET /api/discussions/:id/comments` - Scroll the flattened thread
/// - `POST /api/comments/:id/reaction` - React to a comment
pub fn comment_router() -> Router<CommentAppState> {
    Router::new()
        .route(
            "/api/discussions/:id/comments",
            post(post_comment).get(list_comments),
        )
        .route("/api/comments/:id/reaction", post(cast_reaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryStore;

    fn test_state() -> CommentAppState {
        let store = Arc::new(InMemoryStore::new());
        CommentAppState {
            comment_repository: store.clone(),
            comment_reader: store.clone(),
            discussion_repository: store.clone(),
            reaction_repository: store,
        }
    }

    #[tokio::test]
    async fn listing_comments_of_missing_debate_is_not_found() {
        let app = comment_router().with_state(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/discussions/42/comments")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reaction_without_token_is_unauthorized() {
        let app = comment_router().with_state(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/comments/1/reaction")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"kind":"LIKE"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
