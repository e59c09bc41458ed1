//! HTTP adapter for the report module.
//!
//! Exposes report filing and the admin review decision.

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::ReportAppState;
pub use routes::report_router;
