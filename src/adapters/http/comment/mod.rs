//! HTTP adapter for the comment module.
//!
//! Exposes posting, the flattened-thread scroll, and reactions.

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::CommentAppState;
pub use routes::comment_router;
