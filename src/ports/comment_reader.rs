//! Comment reader port (read side).
//!
//! The reader returns the raw rows for one debate; thread ordering,
//! flattened positions and top-comment selection are computed in the
//! domain (`comment::flatten_thread`), not in the store.

use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::foundation::{DiscussionId, DomainError};

/// Reader port for comment queries.
#[async_trait]
pub trait CommentReader: Send + Sync {
    /// Load every comment of a debate, blocked ones included.
    ///
    /// Order is unspecified; callers sort through the thread engine.
    async fn find_by_discussion(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<Comment>, DomainError>;

    /// Count comments per debate (for list summaries).
    async fn count_by_discussion(&self, discussion_id: DiscussionId) -> Result<u32, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn comment_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn CommentReader) {}
    }
}
