//! HTTP DTOs for comment endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::comment::ThreadEntry;
use crate::domain::foundation::ViewStatus;
use crate::domain::vote::{ReactionKind, VoteType};

// ════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════

/// Request to post a comment or reply.
#[derive(Debug, Clone, Deserialize)]
pub struct PostCommentRequest {
    /// Present when replying to another comment.
    pub parent_id: Option<i64>,
    /// Side the author takes.
    pub vote_type: VoteType,
    pub content: String,
}

/// Request to react to a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CastReactionRequest {
    pub kind: ReactionKind,
}

/// Query parameters for the comment thread scroll.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCommentsQuery {
    /// Cursor: id of the last comment seen, 0 or absent = from the start.
    pub last_id: Option<i64>,
    /// Page size.
    pub size: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════

/// Response for the comment command endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CommentCommandResponse {
    pub comment_id: i64,
    pub message: String,
}

/// One comment in the flattened thread.
///
/// Blocked comments keep their slot but ship no content.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadEntryResponse {
    pub id: i64,
    pub author_id: i64,
    pub parent_id: Option<i64>,
    pub vote_type: VoteType,
    pub content: Option<String>,
    pub like_count: u32,
    pub dislike_count: u32,
    pub view_status: ViewStatus,
    pub created_at: DateTime<Utc>,
    /// Depth-first position within the thread, starting at 0.
    pub position: usize,
    /// Whether this is one of the highlighted top comments.
    pub is_selected: bool,
}

impl From<ThreadEntry> for ThreadEntryResponse {
    fn from(entry: ThreadEntry) -> Self {
        let comment = entry.comment;
        let content = if comment.is_blocked() {
            None
        } else {
            Some(comment.content().to_string())
        };

        Self {
            id: comment.id().value(),
            author_id: comment.author_id().value(),
            parent_id: comment.parent_id().map(|p| p.value()),
            vote_type: comment.vote_type(),
            content,
            like_count: comment.like_count(),
            dislike_count: comment.dislike_count(),
            view_status: comment.view_status(),
            created_at: *comment.created_at().as_datetime(),
            position: entry.position,
            is_selected: entry.is_selected,
        }
    }
}
