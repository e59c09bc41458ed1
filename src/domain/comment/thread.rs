//! Read-time comment thread ordering.
//!
//! Nothing here is persisted: ordering, selection and flattened positions
//! are all derived from the raw comment rows on every read.
//!
//! # Ordering
//!
//! - Top-level comments sort by `(like_count desc, created_at desc)`.
//! - Replies sort under their parent by `created_at asc`.
//! - The flattened order is a depth-first walk: each top-level comment
//!   followed immediately by its replies.
//! - `is_selected` marks the top 3 non-blocked top-level comments by like
//!   count.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, CursorPage, ScrollQuery};

use super::Comment;

/// How many top comments are highlighted per debate.
pub const SELECTED_COUNT: usize = 3;

/// One entry in the flattened thread view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEntry {
    pub comment: Comment,
    /// Depth-first position within the thread, starting at 0.
    pub position: usize,
    /// Whether this comment is one of the highlighted top comments.
    pub is_selected: bool,
}

/// Flattens a debate's comments into display order.
///
/// Input order does not matter. Blocked comments stay in the thread (they
/// render as blocked) but never count toward selection. Replies whose
/// parent is missing from the input are dropped.
pub fn flatten_thread(comments: Vec<Comment>) -> Vec<ThreadEntry> {
    let mut top_level: Vec<Comment> = Vec::new();
    let mut replies_by_parent: HashMap<CommentId, Vec<Comment>> = HashMap::new();

    for comment in comments {
        match comment.parent_id() {
            Some(parent_id) => replies_by_parent.entry(parent_id).or_default().push(comment),
            None => top_level.push(comment),
        }
    }

    top_level.sort_by(|a, b| {
        b.like_count()
            .cmp(&a.like_count())
            .then_with(|| b.created_at().as_datetime().cmp(&a.created_at().as_datetime()))
    });

    let selected: Vec<CommentId> = top_level
        .iter()
        .filter(|c| !c.is_blocked())
        .take(SELECTED_COUNT)
        .map(|c| c.id())
        .collect();

    let mut entries = Vec::new();
    for parent in top_level {
        let parent_id = parent.id();
        let is_selected = selected.contains(&parent_id);
        entries.push(ThreadEntry {
            comment: parent,
            position: entries.len(),
            is_selected,
        });

        if let Some(mut replies) = replies_by_parent.remove(&parent_id) {
            replies.sort_by(|a, b| {
                a.created_at()
                    .as_datetime()
                    .cmp(&b.created_at().as_datetime())
            });
            for reply in replies {
                entries.push(ThreadEntry {
                    comment: reply,
                    position: entries.len(),
                    is_selected: false,
                });
            }
        }
    }

    entries
}

/// Slices one page out of a flattened thread.
///
/// The cursor is the id of the last comment seen; `last_id = 0` starts
/// from the top. An unknown cursor (comment blocked out of existence,
/// stale client) also starts from the top.
pub fn page_thread(entries: Vec<ThreadEntry>, query: ScrollQuery) -> CursorPage<ThreadEntry> {
    let start = if query.is_first_page() {
        0
    } else {
        entries
            .iter()
            .position(|e| e.comment.id().value() == query.last_id)
            .map(|idx| idx + 1)
            .unwrap_or(0)
    };

    let size = query.size as usize;
    let has_next = entries.len() > start + size;
    let items: Vec<ThreadEntry> = entries.into_iter().skip(start).take(size).collect();

    CursorPage::new(items, has_next, |e| e.comment.id().value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DiscussionId, MemberId, Timestamp, ViewStatus};
    use crate::domain::vote::VoteType;

    fn comment(id: i64, parent: Option<i64>, likes: u32, created_secs: i64) -> Comment {
        Comment::reconstitute(
            CommentId::new(id),
            DiscussionId::new(1),
            MemberId::new(id),
            parent.map(CommentId::new),
            VoteType::Agree,
            format!("comment {}", id),
            likes,
            0,
            ViewStatus::Normal,
            Timestamp::from_unix_secs(created_secs),
        )
    }

    fn blocked(id: i64, likes: u32, created_secs: i64) -> Comment {
        let mut c = comment(id, None, likes, created_secs);
        c.set_view_status(ViewStatus::Blocked);
        c
    }

    fn ids(entries: &[ThreadEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.comment.id().value()).collect()
    }

    #[test]
    fn top_level_sorts_by_likes_then_recency() {
        let entries = flatten_thread(vec![
            comment(1, None, 2, 100),
            comment(2, None, 5, 50),
            comment(3, None, 2, 200),
        ]);
        assert_eq!(ids(&entries), vec![2, 3, 1]);
    }

    #[test]
    fn replies_follow_their_parent_oldest_first() {
        let entries = flatten_thread(vec![
            comment(1, None, 3, 100),
            comment(2, None, 1, 110),
            comment(10, Some(1), 9, 300),
            comment(11, Some(1), 0, 200),
            comment(12, Some(2), 0, 400),
        ]);
        // Reply likes do not affect ordering; only created_at asc.
        assert_eq!(ids(&entries), vec![1, 11, 10, 2, 12]);
    }

    #[test]
    fn positions_follow_the_flattened_walk() {
        let entries = flatten_thread(vec![
            comment(1, None, 3, 100),
            comment(10, Some(1), 0, 200),
        ]);
        assert_eq!(entries[0].position, 0);
        assert_eq!(entries[1].position, 1);
    }

    #[test]
    fn selection_marks_top_three_non_blocked_top_level() {
        let entries = flatten_thread(vec![
            comment(1, None, 10, 100),
            blocked(2, 9, 100),
            comment(3, None, 8, 100),
            comment(4, None, 7, 100),
            comment(5, None, 6, 100),
            comment(10, Some(1), 99, 100),
        ]);

        let selected: Vec<i64> = entries
            .iter()
            .filter(|e| e.is_selected)
            .map(|e| e.comment.id().value())
            .collect();
        // Blocked comment 2 stays in the thread but is never selected;
        // reply 10 is never selected regardless of likes.
        assert_eq!(selected, vec![1, 3, 4]);
    }

    #[test]
    fn fewer_than_three_comments_are_all_selected() {
        let entries = flatten_thread(vec![comment(1, None, 0, 100), comment(2, None, 0, 50)]);
        assert!(entries.iter().all(|e| e.is_selected));
    }

    #[test]
    fn orphaned_replies_are_dropped() {
        let entries = flatten_thread(vec![comment(1, None, 0, 100), comment(9, Some(404), 0, 100)]);
        assert_eq!(ids(&entries), vec![1]);
    }

    #[test]
    fn paging_walks_the_flattened_order() {
        let entries = flatten_thread(vec![
            comment(1, None, 3, 100),
            comment(10, Some(1), 0, 200),
            comment(2, None, 1, 100),
        ]);

        let first = page_thread(entries.clone(), ScrollQuery::new(0, 2));
        assert_eq!(
            first.items.iter().map(|e| e.comment.id().value()).collect::<Vec<_>>(),
            vec![1, 10]
        );
        assert!(first.has_next);
        assert_eq!(first.last_id, 10);

        let second = page_thread(entries, ScrollQuery::new(first.last_id, 2));
        assert_eq!(
            second.items.iter().map(|e| e.comment.id().value()).collect::<Vec<_>>(),
            vec![2]
        );
        assert!(!second.has_next);
    }

    #[test]
    fn unknown_cursor_restarts_from_the_top() {
        let entries = flatten_thread(vec![comment(1, None, 0, 100)]);
        let page = page_thread(entries, ScrollQuery::new(999, 10));
        assert_eq!(page.items.len(), 1);
    }
}
