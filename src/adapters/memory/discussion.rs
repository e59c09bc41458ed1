//! In-memory discussion repository and reader.

use async_trait::async_trait;

use crate::domain::discussion::{AnalysisVerdict, Discussion, DiscussionStatus};
use crate::domain::foundation::{
    CursorPage, DiscussionId, DomainError, ErrorCode, MemberId, ScrollQuery, Timestamp,
    ViewStatus,
};
use crate::domain::report::ReportTarget;
use crate::domain::vote::VoteType;
use crate::ports::{
    DiscussionDetail, DiscussionFilter, DiscussionReader, DiscussionRepository,
    DiscussionSummary,
};

use super::InMemoryStore;

fn not_found(id: DiscussionId) -> DomainError {
    DomainError::new(
        ErrorCode::DiscussionNotFound,
        format!("Discussion not found: {}", id),
    )
}

#[async_trait]
impl DiscussionRepository for InMemoryStore {
    async fn next_id(&self) -> Result<DiscussionId, DomainError> {
        Ok(DiscussionId::new(self.take_discussion_id()))
    }

    async fn save(&self, discussion: &Discussion) -> Result<(), DomainError> {
        self.lock()
            .discussions
            .insert(discussion.id().value(), discussion.clone());
        Ok(())
    }

    async fn update(&self, discussion: &Discussion) -> Result<(), DomainError> {
        let mut tables = self.lock();
        if !tables.discussions.contains_key(&discussion.id().value()) {
            return Err(not_found(discussion.id()));
        }
        tables
            .discussions
            .insert(discussion.id().value(), discussion.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DiscussionId) -> Result<Option<Discussion>, DomainError> {
        Ok(self.lock().discussions.get(&id.value()).cloned())
    }

    async fn transition_status(
        &self,
        id: DiscussionId,
        expected: DiscussionStatus,
        next: DiscussionStatus,
    ) -> Result<bool, DomainError> {
        let mut tables = self.lock();
        let discussion = tables
            .discussions
            .get_mut(&id.value())
            .ok_or_else(|| not_found(id))?;

        if discussion.status() != expected {
            return Ok(false);
        }
        match next {
            DiscussionStatus::Ongoing => discussion.open(),
            DiscussionStatus::Analyzing => discussion.begin_analysis(),
            // Closed goes through apply_analysis, never bare CAS.
            _ => {
                return Err(DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    format!("Unsupported CAS target: {}", next),
                ))
            }
        }
        .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        Ok(true)
    }

    async fn apply_analysis(
        &self,
        id: DiscussionId,
        verdict: &AnalysisVerdict,
        closed_at: Timestamp,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let discussion = tables
            .discussions
            .get_mut(&id.value())
            .ok_or_else(|| not_found(id))?;
        discussion
            .apply_analysis(verdict.clone(), closed_at)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))
    }

    async fn increment_views(&self, id: DiscussionId) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let discussion = tables
            .discussions
            .get_mut(&id.value())
            .ok_or_else(|| not_found(id))?;
        discussion.record_view();
        Ok(())
    }

    async fn increment_vote_count(
        &self,
        id: DiscussionId,
        vote_type: VoteType,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let discussion = tables
            .discussions
            .get_mut(&id.value())
            .ok_or_else(|| not_found(id))?;
        discussion.apply_vote(vote_type);
        Ok(())
    }

    async fn set_view_status(
        &self,
        id: DiscussionId,
        view_status: ViewStatus,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let discussion = tables
            .discussions
            .get_mut(&id.value())
            .ok_or_else(|| not_found(id))?;
        discussion.set_view_status(view_status);
        Ok(())
    }
}

#[async_trait]
impl DiscussionReader for InMemoryStore {
    async fn get_detail(
        &self,
        id: DiscussionId,
        viewer: Option<MemberId>,
    ) -> Result<Option<DiscussionDetail>, DomainError> {
        let tables = self.lock();
        let Some(discussion) = tables.discussions.get(&id.value()) else {
            return Ok(None);
        };

        let (already_reported, my_vote) = match viewer {
            Some(member_id) => {
                let target = ReportTarget::discussion(id.value());
                let already_reported = tables.reports.values().any(|r| {
                    r.target() == target
                        && r.reporter_id() == member_id
                        && r.status().is_active()
                });
                let my_vote = tables
                    .participants
                    .get(&(id.value(), member_id.value()))
                    .map(|p| p.vote_type());
                (already_reported, my_vote)
            }
            None => (false, None),
        };

        let tally = discussion.tally();
        Ok(Some(DiscussionDetail {
            id: discussion.id(),
            author_id: discussion.author_id(),
            title: discussion.title().to_string(),
            content: discussion.content().to_string(),
            isbn: discussion.book().isbn().to_string(),
            book_title: discussion.book().title().to_string(),
            book_cover_url: discussion.book().cover_url().map(String::from),
            status: discussion.status(),
            view_status: discussion.view_status(),
            start_date: discussion.start_date(),
            ends_at: discussion.ends_at(),
            closed_at: discussion.closed_at(),
            created_at: discussion.created_at(),
            views: discussion.views(),
            agree_count: tally.agree_count(),
            disagree_count: tally.disagree_count(),
            agree_percent: tally.agree_percent(),
            disagree_percent: tally.disagree_percent(),
            conclusion: discussion.analysis().map(|a| a.conclusion.clone()),
            verdict: discussion.analysis().and_then(|a| a.verdict),
            already_reported,
            my_vote,
        }))
    }

    async fn scroll(
        &self,
        filter: &DiscussionFilter,
        query: ScrollQuery,
    ) -> Result<CursorPage<DiscussionSummary>, DomainError> {
        let tables = self.lock();
        let keyword = filter.keyword.as_deref().map(str::to_lowercase);

        // Newest first; the cursor is the smallest id already seen.
        let mut matching: Vec<&Discussion> = tables
            .discussions
            .values()
            .rev()
            .filter(|d| query.is_first_page() || d.id().value() < query.last_id)
            .filter(|d| filter.status.map_or(true, |s| d.status() == s))
            .filter(|d| {
                keyword.as_deref().map_or(true, |kw| {
                    d.title().to_lowercase().contains(kw)
                        || d.book().title().to_lowercase().contains(kw)
                })
            })
            .collect();

        let size = query.size as usize;
        let has_next = matching.len() > size;
        matching.truncate(size);

        let items: Vec<DiscussionSummary> = matching
            .into_iter()
            .map(|d| DiscussionSummary {
                id: d.id(),
                title: d.title().to_string(),
                book_title: d.book().title().to_string(),
                book_cover_url: d.book().cover_url().map(String::from),
                status: d.status(),
                view_status: d.view_status(),
                start_date: d.start_date(),
                views: d.views(),
                comment_count: tables
                    .comments
                    .values()
                    .filter(|c| c.discussion_id() == d.id())
                    .count() as u32,
            })
            .collect();

        Ok(CursorPage::new(items, has_next, |s| s.id.value()))
    }
}
