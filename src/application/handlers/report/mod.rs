//! Report and moderation handlers.

mod review_report;
mod submit_report;

pub use review_report::{ReviewReportCommand, ReviewReportHandler, ReviewReportResult};
pub use submit_report::{SubmitReportCommand, SubmitReportHandler, SubmitReportResult};
