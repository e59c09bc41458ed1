//! Comment thread handlers.

mod list_comments;
mod post_comment;

pub use list_comments::ListCommentsHandler;
pub use post_comment::{PostCommentCommand, PostCommentHandler};
