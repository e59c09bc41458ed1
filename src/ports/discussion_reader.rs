//! Discussion reader port (read side / CQRS queries).
//!
//! # Design
//!
//! - **Read-optimized**: list and detail views shaped for the UI
//! - **Cursor pagination**: monotone-id scroll, never offset paging
//! - **Viewer-aware**: the detail view carries per-viewer flags

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::discussion::DiscussionStatus;
use crate::domain::foundation::{
    CursorPage, DiscussionId, DomainError, MemberId, Percentage, ScrollQuery, Timestamp,
    ViewStatus,
};
use crate::domain::vote::VoteType;

/// Reader port for discussion queries.
#[async_trait]
pub trait DiscussionReader: Send + Sync {
    /// Get the detail view, including viewer-specific flags.
    ///
    /// Returns `None` if not found.
    async fn get_detail(
        &self,
        id: DiscussionId,
        viewer: Option<MemberId>,
    ) -> Result<Option<DiscussionDetail>, DomainError>;

    /// Scroll the discussion list, newest first.
    ///
    /// Results are ordered by id descending; `query.last_id = 0` starts
    /// from the newest.
    async fn scroll(
        &self,
        filter: &DiscussionFilter,
        query: ScrollQuery,
    ) -> Result<CursorPage<DiscussionSummary>, DomainError>;
}

/// Filter for the discussion list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscussionFilter {
    /// Restrict to one lifecycle status (None = all).
    pub status: Option<DiscussionStatus>,

    /// Case-insensitive keyword over title and book title.
    pub keyword: Option<String>,
}

impl DiscussionFilter {
    pub fn with_status(mut self, status: DiscussionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

/// Summary view of a discussion for lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionSummary {
    pub id: DiscussionId,
    pub title: String,
    pub book_title: String,
    pub book_cover_url: Option<String>,
    pub status: DiscussionStatus,
    pub view_status: ViewStatus,
    pub start_date: Timestamp,
    pub views: u64,
    pub comment_count: u32,
}

/// Detailed view of a discussion, with viewer-specific flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionDetail {
    pub id: DiscussionId,
    pub author_id: MemberId,
    pub title: String,
    pub content: String,
    pub isbn: String,
    pub book_title: String,
    pub book_cover_url: Option<String>,
    pub status: DiscussionStatus,
    pub view_status: ViewStatus,
    pub start_date: Timestamp,
    pub ends_at: Timestamp,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub views: u64,
    pub agree_count: u32,
    pub disagree_count: u32,
    /// Agree/disagree shares; `None` until the first vote is cast.
    pub agree_percent: Option<Percentage>,
    pub disagree_percent: Option<Percentage>,
    pub conclusion: Option<String>,
    pub verdict: Option<bool>,

    /// Whether the viewer already holds an active report on this debate.
    pub already_reported: bool,

    /// Side the viewer voted, if they voted.
    pub my_vote: Option<VoteType>,
}
