//! Discussion lifecycle handlers.
//!
//! Commands and queries for the debate lifecycle, plus the two trigger
//! handlers fired by the scheduler.

mod apply_analysis;
mod close_discussion;
mod get_discussion;
mod list_discussions;
mod open_discussion;
mod record_view;
mod register_discussion;
mod update_discussion;

pub use apply_analysis::ApplyAnalysisHandler;
pub use close_discussion::{CloseDiscussionHandler, DEFAULT_MAX_ANALYSIS_ATTEMPTS};
pub use get_discussion::GetDiscussionHandler;
pub use list_discussions::ListDiscussionsHandler;
pub use open_discussion::OpenDiscussionHandler;
pub use record_view::RecordViewHandler;
pub use register_discussion::{
    RegisterDiscussionCommand, RegisterDiscussionHandler, RegisterDiscussionResult,
};
pub use update_discussion::{UpdateDiscussionCommand, UpdateDiscussionHandler};
