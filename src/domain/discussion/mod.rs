//! Discussion domain module.
//!
//! A discussion is a scheduled, time-boxed debate tied to a book. It walks
//! `Waiting -> Ongoing -> Analyzing -> Closed`, driven by scheduler triggers
//! at its start and end times, and carries an analysis verdict once closed.
//!
//! # Events
//!
//! - `DiscussionRegistered` - Published when a debate is scheduled
//! - `DiscussionOpened` - Published when the open trigger fires
//! - `DiscussionClosed` - Published when the analysis result is applied

mod aggregate;
mod book;
mod errors;
mod events;
mod policy;
mod status;

pub use aggregate::{AnalysisVerdict, Discussion, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH};
pub use book::BookRef;
pub use errors::DiscussionError;
pub use events::{DiscussionClosed, DiscussionOpened, DiscussionRegistered};
pub use policy::DebatePolicy;
pub use status::DiscussionStatus;
