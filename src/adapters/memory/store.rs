//! Shared in-memory store backing the memory adapters.
//!
//! One `Mutex` guards every table so the cross-table moderation
//! decisions (threshold escalation, reject-and-unblock) are atomic the
//! same way the postgres adapter's transactions are. Critical sections
//! are short and never held across an await.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::comment::Comment;
use crate::domain::discussion::Discussion;
use crate::domain::report::Report;
use crate::domain::vote::{Participant, Reaction};

#[derive(Default)]
pub(super) struct Tables {
    /// Keyed by id; BTreeMap keeps id order for cursor scans.
    pub discussions: BTreeMap<i64, Discussion>,
    pub comments: BTreeMap<i64, Comment>,
    pub reports: BTreeMap<i64, Report>,

    /// Keyed by (discussion_id, member_id).
    pub participants: HashMap<(i64, i64), Participant>,

    /// Keyed by (comment_id, member_id).
    pub reactions: HashMap<(i64, i64), Reaction>,
}

/// In-memory store implementing every persistence port.
///
/// Used by unit and integration tests, and usable as a development
/// backend when no database is around.
pub struct InMemoryStore {
    pub(super) tables: Mutex<Tables>,
    next_discussion_id: AtomicI64,
    next_comment_id: AtomicI64,
    next_report_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            next_discussion_id: AtomicI64::new(1),
            next_comment_id: AtomicI64::new(1),
            next_report_id: AtomicI64::new(1),
        }
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("in-memory store lock poisoned")
    }

    pub(super) fn take_discussion_id(&self) -> i64 {
        self.next_discussion_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(super) fn take_comment_id(&self) -> i64 {
        self.next_comment_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(super) fn take_report_id(&self) -> i64 {
        self.next_report_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
