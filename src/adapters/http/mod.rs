//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod comment;
pub mod discussion;
pub mod error;
pub mod middleware;
pub mod report;

// Re-export key types for convenience
pub use comment::{comment_router, CommentAppState};
pub use discussion::{discussion_router, DiscussionAppState};
pub use error::ErrorResponse;
pub use report::{report_router, ReportAppState};
