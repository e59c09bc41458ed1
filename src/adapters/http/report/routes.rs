//! Route configuration for report endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{review_report, submit_report, ReportAppState};

/// Creates the report router with all endpoints.
///
/// Routes:
/// - `POST /api/reports` - File a report against a debate or comment
/// - `POST /api/reports/:id/review` - Admin decision (ACCEPT/REJECT)
pub fn report_router() -> Router<ReportAppState> {
    Router::new()
        .route("/api/reports", post(submit_report))
        .route("/api/reports/:id/review", post(review_report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryStore;

    fn test_state() -> ReportAppState {
        let store = Arc::new(InMemoryStore::new());
        ReportAppState {
            report_repository: store.clone(),
            target_directory: store,
            event_publisher: Arc::new(InMemoryEventBus::new()),
        }
    }

    #[tokio::test]
    async fn submit_without_token_is_unauthorized() {
        let app = report_router().with_state(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/reports")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"target_kind":"DISCUSSION","target_id":1,"reason":"spam"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
