//! Discussion aggregate entity.
//!
//! A discussion is a time-boxed public debate tied to a book. It owns its
//! comments and participant records (cascade-blocked, never deleted) and
//! walks a forward-only lifecycle driven by scheduler triggers.
//!
//! # Invariants
//!
//! - `created_at + min_lead <= start_date <= created_at + max_lead`
//! - status only moves `Waiting -> Ongoing -> Analyzing -> Closed`
//! - `closed_at` and the analysis verdict are set only on close
//! - `view_status` is orthogonal and settable from any status

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DiscussionId, MemberId, Percentage, StateMachine, TimerId, Timestamp, ViewStatus,
};
use crate::domain::vote::{VoteTally, VoteType};

use super::{BookRef, DebatePolicy, DiscussionError, DiscussionStatus};

/// Maximum length for a discussion title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for the opening statement.
pub const MAX_CONTENT_LENGTH: usize = 5000;

/// Result produced by the analysis adapter when a debate closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisVerdict {
    /// Natural-language conclusion summarizing the debate.
    pub conclusion: String,
    /// Overall outcome; None when the debate was inconclusive.
    pub verdict: Option<bool>,
    /// Agree share as judged by the analysis; None when undetermined.
    pub agree_percent: Option<Percentage>,
}

impl AnalysisVerdict {
    /// Disagree share derived as the complement of the agree share.
    pub fn disagree_percent(&self) -> Option<Percentage> {
        self.agree_percent.map(|p| p.complement())
    }
}

/// Discussion aggregate - a time-boxed debate on a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    /// Unique identifier, assigned by persistence.
    id: DiscussionId,

    /// Book this debate is tied to.
    book: BookRef,

    /// Member who registered the debate.
    author_id: MemberId,

    /// Debate title.
    title: String,

    /// Opening statement.
    content: String,

    /// Lifecycle status.
    status: DiscussionStatus,

    /// Moderation visibility flag, orthogonal to status.
    view_status: ViewStatus,

    /// When the debate opens.
    start_date: Timestamp,

    /// When the debate closes (start + debate window).
    ends_at: Timestamp,

    /// Set only when the discussion reaches Closed.
    closed_at: Option<Timestamp>,

    /// When the discussion was registered. Immutable.
    created_at: Timestamp,

    /// Monotonic view counter.
    views: u64,

    /// Running vote counters, maintained by the vote ledger.
    agree_count: u32,
    disagree_count: u32,

    /// Analysis outcome, present only once Closed.
    analysis: Option<AnalysisVerdict>,

    /// Number of analysis attempts made so far, surfaced to operators.
    analysis_attempts: u32,

    /// Scheduler handles for the open/close timers while Waiting.
    open_timer: Option<TimerId>,
    close_timer: Option<TimerId>,
}

impl Discussion {
    /// Registers a new debate in the Waiting state.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title or content is empty or too long
    /// - `SchedulingWindow` if `start_date` is not within
    ///   `[now + min_lead, now + max_lead]`
    pub fn register(
        id: DiscussionId,
        author_id: MemberId,
        book: BookRef,
        title: String,
        content: String,
        start_date: Timestamp,
        policy: &DebatePolicy,
        now: Timestamp,
    ) -> Result<Self, DiscussionError> {
        Self::validate_text(&title, "title", MAX_TITLE_LENGTH)?;
        Self::validate_text(&content, "content", MAX_CONTENT_LENGTH)?;
        Self::validate_window(start_date, policy, now)?;

        Ok(Self {
            id,
            book,
            author_id,
            title,
            content,
            status: DiscussionStatus::Waiting,
            view_status: ViewStatus::Normal,
            start_date,
            ends_at: start_date.plus_hours(policy.debate_window_hours),
            closed_at: None,
            created_at: now,
            views: 0,
            agree_count: 0,
            disagree_count: 0,
            analysis: None,
            analysis_attempts: 0,
            open_timer: None,
            close_timer: None,
        })
    }

    /// Reconstitute a discussion from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DiscussionId,
        book: BookRef,
        author_id: MemberId,
        title: String,
        content: String,
        status: DiscussionStatus,
        view_status: ViewStatus,
        start_date: Timestamp,
        ends_at: Timestamp,
        closed_at: Option<Timestamp>,
        created_at: Timestamp,
        views: u64,
        agree_count: u32,
        disagree_count: u32,
        analysis: Option<AnalysisVerdict>,
        analysis_attempts: u32,
        open_timer: Option<TimerId>,
        close_timer: Option<TimerId>,
    ) -> Self {
        Self {
            id,
            book,
            author_id,
            title,
            content,
            status,
            view_status,
            start_date,
            ends_at,
            closed_at,
            created_at,
            views,
            agree_count,
            disagree_count,
            analysis,
            analysis_attempts,
            open_timer,
            close_timer,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> DiscussionId {
        self.id
    }

    pub fn book(&self) -> &BookRef {
        &self.book
    }

    pub fn author_id(&self) -> MemberId {
        self.author_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> DiscussionStatus {
        self.status
    }

    pub fn view_status(&self) -> ViewStatus {
        self.view_status
    }

    pub fn start_date(&self) -> Timestamp {
        self.start_date
    }

    pub fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    pub fn closed_at(&self) -> Option<Timestamp> {
        self.closed_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn views(&self) -> u64 {
        self.views
    }

    /// Current vote counters with derived percentages.
    pub fn tally(&self) -> VoteTally {
        VoteTally::new(self.agree_count, self.disagree_count)
    }

    pub fn analysis(&self) -> Option<&AnalysisVerdict> {
        self.analysis.as_ref()
    }

    pub fn analysis_attempts(&self) -> u32 {
        self.analysis_attempts
    }

    pub fn open_timer(&self) -> Option<TimerId> {
        self.open_timer
    }

    pub fn close_timer(&self) -> Option<TimerId> {
        self.close_timer
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────

    /// Checks if the given member registered this debate.
    pub fn is_author(&self, member_id: MemberId) -> bool {
        self.author_id == member_id
    }

    /// Validates that the member may edit this debate.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the member is not the author
    pub fn authorize_edit(&self, member_id: MemberId) -> Result<(), DiscussionError> {
        if self.is_author(member_id) {
            Ok(())
        } else {
            Err(DiscussionError::forbidden())
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Updates title, content and start date while still Waiting.
    ///
    /// Re-validates the scheduling window against the current clock and
    /// recomputes the close time. Timer re-registration is the caller's
    /// responsibility (cancel + register).
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless status is Waiting
    /// - `ValidationFailed` / `SchedulingWindow` as for registration
    pub fn update(
        &mut self,
        title: String,
        content: String,
        start_date: Timestamp,
        policy: &DebatePolicy,
        now: Timestamp,
    ) -> Result<(), DiscussionError> {
        self.ensure_status(DiscussionStatus::Waiting)?;
        Self::validate_text(&title, "title", MAX_TITLE_LENGTH)?;
        Self::validate_text(&content, "content", MAX_CONTENT_LENGTH)?;
        Self::validate_window(start_date, policy, now)?;

        self.title = title;
        self.content = content;
        self.start_date = start_date;
        self.ends_at = start_date.plus_hours(policy.debate_window_hours);
        Ok(())
    }

    /// Records the scheduler handles for the open/close timers.
    pub fn set_timers(&mut self, open_timer: TimerId, close_timer: TimerId) {
        self.open_timer = Some(open_timer);
        self.close_timer = Some(close_timer);
    }

    /// Open trigger: Waiting -> Ongoing.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless status is Waiting
    pub fn open(&mut self) -> Result<(), DiscussionError> {
        self.status = self
            .status
            .transition_to(DiscussionStatus::Ongoing)
            .map_err(|_| DiscussionError::invalid_state(self.status))?;
        Ok(())
    }

    /// Close trigger: Ongoing -> Analyzing.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless status is Ongoing
    pub fn begin_analysis(&mut self) -> Result<(), DiscussionError> {
        self.status = self
            .status
            .transition_to(DiscussionStatus::Analyzing)
            .map_err(|_| DiscussionError::invalid_state(self.status))?;
        Ok(())
    }

    /// Counts an analysis attempt; returns the new attempt number.
    pub fn note_analysis_attempt(&mut self) -> u32 {
        self.analysis_attempts += 1;
        self.analysis_attempts
    }

    /// Persists the analysis outcome: Analyzing -> Closed.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless status is Analyzing
    pub fn apply_analysis(
        &mut self,
        verdict: AnalysisVerdict,
        now: Timestamp,
    ) -> Result<(), DiscussionError> {
        self.status = self
            .status
            .transition_to(DiscussionStatus::Closed)
            .map_err(|_| DiscussionError::invalid_state(self.status))?;
        self.analysis = Some(verdict);
        self.closed_at = Some(now);
        Ok(())
    }

    /// Applies one vote to the running counters.
    ///
    /// Uniqueness per (discussion, member) is enforced by the ledger; the
    /// aggregate only keeps the derived counts in step.
    pub fn apply_vote(&mut self, vote_type: VoteType) {
        match vote_type {
            VoteType::Agree => self.agree_count += 1,
            VoteType::Disagree => self.disagree_count += 1,
        }
    }

    /// Counts one view. Commutative; callers may batch or relax ordering.
    pub fn record_view(&mut self) {
        self.views += 1;
    }

    /// Sets the moderation visibility flag. Allowed from any status.
    pub fn set_view_status(&mut self, view_status: ViewStatus) {
        self.view_status = view_status;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────

    fn ensure_status(&self, expected: DiscussionStatus) -> Result<(), DiscussionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(DiscussionError::invalid_state(self.status))
        }
    }

    fn validate_text(value: &str, field: &str, max: usize) -> Result<(), DiscussionError> {
        if value.trim().is_empty() {
            return Err(DiscussionError::validation(field, "cannot be empty"));
        }
        if value.chars().count() > max {
            return Err(DiscussionError::validation(
                field,
                format!("must be at most {} characters", max),
            ));
        }
        Ok(())
    }

    fn validate_window(
        start_date: Timestamp,
        policy: &DebatePolicy,
        now: Timestamp,
    ) -> Result<(), DiscussionError> {
        let earliest = now.plus_hours(policy.min_lead_hours);
        let latest = now.plus_hours(policy.max_lead_hours);
        if start_date.is_before(&earliest) || start_date.is_after(&latest) {
            let actual_hours = start_date.duration_since(&now).num_hours();
            return Err(DiscussionError::scheduling_window(
                policy.min_lead_hours,
                policy.max_lead_hours,
                actual_hours,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> BookRef {
        BookRef::new("9788932917245", "The Vegetarian", None).unwrap()
    }

    fn register_at(start_hours: i64) -> Result<Discussion, DiscussionError> {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        Discussion::register(
            DiscussionId::new(1),
            MemberId::new(10),
            book(),
            "Is the ending earned?".to_string(),
            "Let's debate the final chapter.".to_string(),
            now.plus_hours(start_hours),
            &DebatePolicy::default(),
            now,
        )
    }

    #[test]
    fn register_rejects_start_23_hours_out() {
        let result = register_at(23);
        assert!(matches!(
            result,
            Err(DiscussionError::SchedulingWindow { actual_hours: 23, .. })
        ));
    }

    #[test]
    fn register_accepts_start_25_hours_out() {
        let discussion = register_at(25).unwrap();
        assert_eq!(discussion.status(), DiscussionStatus::Waiting);
        assert_eq!(discussion.view_status(), ViewStatus::Normal);
    }

    #[test]
    fn register_rejects_start_8_days_out() {
        let result = register_at(24 * 8);
        assert!(matches!(
            result,
            Err(DiscussionError::SchedulingWindow { .. })
        ));
    }

    #[test]
    fn register_accepts_window_boundaries() {
        assert!(register_at(24).is_ok());
        assert!(register_at(168).is_ok());
    }

    #[test]
    fn register_rejects_empty_title() {
        let now = Timestamp::now();
        let result = Discussion::register(
            DiscussionId::new(1),
            MemberId::new(10),
            book(),
            "  ".to_string(),
            "content".to_string(),
            now.plus_hours(48),
            &DebatePolicy::default(),
            now,
        );
        assert!(matches!(
            result,
            Err(DiscussionError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn ends_at_is_start_plus_debate_window() {
        let discussion = register_at(48).unwrap();
        assert_eq!(discussion.ends_at(), discussion.start_date().plus_hours(24));
    }

    #[test]
    fn lifecycle_walk_reaches_closed_with_verdict() {
        let mut discussion = register_at(48).unwrap();
        discussion.open().unwrap();
        assert_eq!(discussion.status(), DiscussionStatus::Ongoing);

        discussion.begin_analysis().unwrap();
        assert_eq!(discussion.status(), DiscussionStatus::Analyzing);

        let closed_at = Timestamp::now();
        discussion
            .apply_analysis(
                AnalysisVerdict {
                    conclusion: "The agree side carried the debate.".to_string(),
                    verdict: Some(true),
                    agree_percent: Some(Percentage::new(64)),
                },
                closed_at,
            )
            .unwrap();

        assert_eq!(discussion.status(), DiscussionStatus::Closed);
        assert_eq!(discussion.closed_at(), Some(closed_at));
        let verdict = discussion.analysis().unwrap();
        assert_eq!(verdict.agree_percent, Some(Percentage::new(64)));
        assert_eq!(verdict.disagree_percent(), Some(Percentage::new(36)));
    }

    #[test]
    fn open_fails_unless_waiting() {
        let mut discussion = register_at(48).unwrap();
        discussion.open().unwrap();
        let result = discussion.open();
        assert!(matches!(
            result,
            Err(DiscussionError::InvalidState {
                current: DiscussionStatus::Ongoing
            })
        ));
    }

    #[test]
    fn apply_analysis_fails_unless_analyzing() {
        let mut discussion = register_at(48).unwrap();
        let result = discussion.apply_analysis(
            AnalysisVerdict {
                conclusion: "early".to_string(),
                verdict: None,
                agree_percent: None,
            },
            Timestamp::now(),
        );
        assert!(matches!(result, Err(DiscussionError::InvalidState { .. })));
    }

    #[test]
    fn update_only_while_waiting() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let mut discussion = register_at(48).unwrap();
        discussion
            .update(
                "New title".to_string(),
                "New opening".to_string(),
                now.plus_hours(72),
                &DebatePolicy::default(),
                now,
            )
            .unwrap();
        assert_eq!(discussion.title(), "New title");
        assert_eq!(discussion.ends_at(), now.plus_hours(96));

        discussion.open().unwrap();
        let result = discussion.update(
            "Too late".to_string(),
            "Too late".to_string(),
            now.plus_hours(72),
            &DebatePolicy::default(),
            now,
        );
        assert!(matches!(result, Err(DiscussionError::InvalidState { .. })));
    }

    #[test]
    fn authorize_edit_rejects_non_author() {
        let discussion = register_at(48).unwrap();
        assert!(discussion.authorize_edit(MemberId::new(10)).is_ok());
        assert!(matches!(
            discussion.authorize_edit(MemberId::new(11)),
            Err(DiscussionError::Forbidden)
        ));
    }

    #[test]
    fn apply_vote_updates_tally() {
        let mut discussion = register_at(48).unwrap();
        discussion.apply_vote(VoteType::Agree);
        discussion.apply_vote(VoteType::Agree);
        discussion.apply_vote(VoteType::Disagree);

        let tally = discussion.tally();
        assert_eq!(tally.agree_count(), 2);
        assert_eq!(tally.disagree_count(), 1);
    }

    #[test]
    fn block_is_allowed_from_any_status() {
        let mut discussion = register_at(48).unwrap();
        discussion.set_view_status(ViewStatus::Blocked);
        assert_eq!(discussion.view_status(), ViewStatus::Blocked);

        discussion.open().unwrap();
        discussion.set_view_status(ViewStatus::Normal);
        assert_eq!(discussion.view_status(), ViewStatus::Normal);
    }

    #[test]
    fn record_view_increments_monotonically() {
        let mut discussion = register_at(48).unwrap();
        discussion.record_view();
        discussion.record_view();
        assert_eq!(discussion.views(), 2);
    }

    #[test]
    fn analysis_attempts_count_up() {
        let mut discussion = register_at(48).unwrap();
        assert_eq!(discussion.note_analysis_attempt(), 1);
        assert_eq!(discussion.note_analysis_attempt(), 2);
    }
}
