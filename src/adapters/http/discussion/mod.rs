//! HTTP adapter for the discussion module.
//!
//! Exposes debate registration, editing, board/detail queries, the view
//! beacon, and voting via REST endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::DiscussionAppState;
pub use routes::discussion_router;
