//! Comment domain module.
//!
//! Comments form single-level threads (top-level comments plus replies)
//! under an Ongoing debate. Display order, flattened positions and the
//! top-comment selection are computed at read time in `thread`.

mod aggregate;
mod errors;
mod thread;

pub use aggregate::{Comment, MAX_COMMENT_LENGTH};
pub use errors::CommentError;
pub use thread::{flatten_thread, page_thread, ThreadEntry, SELECTED_COUNT};
