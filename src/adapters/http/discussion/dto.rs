//! HTTP DTOs for discussion endpoints.
//!
//! These types define the JSON request/response structure for the debate
//! API. They serve as the boundary between HTTP and the application layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::discussion::DiscussionStatus;
use crate::domain::foundation::{CursorPage, ViewStatus};
use crate::domain::vote::VoteType;
use crate::ports::{DiscussionDetail, DiscussionSummary};

// ════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════

/// Request to register a new debate.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDiscussionRequest {
    /// ISBN of the book under debate.
    pub isbn: String,
    pub title: String,
    pub content: String,
    /// When the debate opens (must respect the scheduling window).
    pub start_date: DateTime<Utc>,
}

/// Request to update a Waiting debate.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDiscussionRequest {
    pub title: String,
    pub content: String,
    pub start_date: DateTime<Utc>,
}

/// Request to cast a vote.
#[derive(Debug, Clone, Deserialize)]
pub struct CastVoteRequest {
    pub vote_type: VoteType,
}

/// Query parameters for the discussion list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDiscussionsQuery {
    /// Lifecycle status tab (WAITING/ONGOING/ANALYZING/CLOSED).
    pub status: Option<String>,
    /// Keyword over title and book title.
    pub keyword: Option<String>,
    /// Cursor: id of the last item seen, 0 or absent = from the newest.
    pub last_id: Option<i64>,
    /// Page size.
    pub size: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════

/// Response for command endpoints that return the debate id.
#[derive(Debug, Clone, Serialize)]
pub struct DiscussionCommandResponse {
    pub discussion_id: i64,
    pub message: String,
}

/// One page of a cursor scroll.
#[derive(Debug, Clone, Serialize)]
pub struct ScrollResponse<T> {
    pub items: Vec<T>,
    pub has_next: bool,
    pub last_id: i64,
}

impl<T, U: From<T>> From<CursorPage<T>> for ScrollResponse<U> {
    fn from(page: CursorPage<T>) -> Self {
        Self {
            items: page.items.into_iter().map(U::from).collect(),
            has_next: page.has_next,
            last_id: page.last_id,
        }
    }
}

/// List item for the debate board.
#[derive(Debug, Clone, Serialize)]
pub struct DiscussionSummaryResponse {
    pub id: i64,
    pub title: String,
    pub book_title: String,
    pub book_cover_url: Option<String>,
    pub status: DiscussionStatus,
    pub view_status: ViewStatus,
    pub start_date: DateTime<Utc>,
    pub views: u64,
    pub comment_count: u32,
}

impl From<DiscussionSummary> for DiscussionSummaryResponse {
    fn from(summary: DiscussionSummary) -> Self {
        Self {
            id: summary.id.value(),
            title: summary.title,
            book_title: summary.book_title,
            book_cover_url: summary.book_cover_url,
            status: summary.status,
            view_status: summary.view_status,
            start_date: *summary.start_date.as_datetime(),
            views: summary.views,
            comment_count: summary.comment_count,
        }
    }
}

/// Detail view of a debate, with viewer-specific flags.
#[derive(Debug, Clone, Serialize)]
pub struct DiscussionDetailResponse {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub isbn: String,
    pub book_title: String,
    pub book_cover_url: Option<String>,
    pub status: DiscussionStatus,
    pub view_status: ViewStatus,
    pub start_date: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub views: u64,
    pub agree_count: u32,
    pub disagree_count: u32,
    /// Null until the first vote is cast.
    pub agree_percent: Option<u8>,
    pub disagree_percent: Option<u8>,
    pub conclusion: Option<String>,
    pub verdict: Option<bool>,
    pub already_reported: bool,
    pub my_vote: Option<VoteType>,
}

impl From<DiscussionDetail> for DiscussionDetailResponse {
    fn from(detail: DiscussionDetail) -> Self {
        Self {
            id: detail.id.value(),
            author_id: detail.author_id.value(),
            title: detail.title,
            content: detail.content,
            isbn: detail.isbn,
            book_title: detail.book_title,
            book_cover_url: detail.book_cover_url,
            status: detail.status,
            view_status: detail.view_status,
            start_date: *detail.start_date.as_datetime(),
            ends_at: *detail.ends_at.as_datetime(),
            closed_at: detail.closed_at.map(|t| *t.as_datetime()),
            created_at: *detail.created_at.as_datetime(),
            views: detail.views,
            agree_count: detail.agree_count,
            disagree_count: detail.disagree_count,
            agree_percent: detail.agree_percent.map(|p| p.value()),
            disagree_percent: detail.disagree_percent.map(|p| p.value()),
            conclusion: detail.conclusion,
            verdict: detail.verdict,
            already_reported: detail.already_reported,
            my_vote: detail.my_vote,
        }
    }
}
