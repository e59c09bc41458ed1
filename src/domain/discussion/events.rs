//! Discussion domain events.
//!
//! Events published when debate lifecycle changes occur:
//! - `DiscussionRegistered` - New debate scheduled
//! - `DiscussionOpened` - Open trigger fired, debate began
//! - `DiscussionClosed` - Analysis applied, debate finished

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, DiscussionId, EventId, MemberId, Percentage, Timestamp,
};

// ════════════════════════════════════════════════════════════════════════════
// DiscussionRegistered
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new debate is registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionRegistered {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the registered debate.
    pub discussion_id: DiscussionId,

    /// Member who registered the debate.
    pub author_id: MemberId,

    /// ISBN of the book being debated.
    pub isbn: String,

    /// Debate title.
    pub title: String,

    /// When the debate opens.
    pub start_date: Timestamp,

    /// When the debate was registered.
    pub registered_at: Timestamp,
}

domain_event!(
    DiscussionRegistered,
    event_type = "discussion.registered",
    aggregate_id = discussion_id,
    aggregate_type = "Discussion",
    occurred_at = registered_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// DiscussionOpened
// ════════════════════════════════════════════════════════════════════════════

/// Published when the open trigger moves a debate to Ongoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionOpened {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the opened debate.
    pub discussion_id: DiscussionId,

    /// When the debate will close.
    pub ends_at: Timestamp,

    /// When the debate opened.
    pub opened_at: Timestamp,
}

domain_event!(
    DiscussionOpened,
    event_type = "discussion.opened",
    aggregate_id = discussion_id,
    aggregate_type = "Discussion",
    occurred_at = opened_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// DiscussionClosed
// ════════════════════════════════════════════════════════════════════════════

/// Published when the analysis result is applied and a debate closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionClosed {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the closed debate.
    pub discussion_id: DiscussionId,

    /// Overall outcome; None when inconclusive.
    pub verdict: Option<bool>,

    /// Agree share per the analysis; None when undetermined.
    pub agree_percent: Option<Percentage>,

    /// When the debate closed.
    pub closed_at: Timestamp,
}

domain_event!(
    DiscussionClosed,
    event_type = "discussion.closed",
    aggregate_id = discussion_id,
    aggregate_type = "Discussion",
    occurred_at = closed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// Unit Tests
// ════════════════════════════════════════════════════════════════════════════
