//! GetDiscussionHandler - detail view query.
//!
//! Reading the detail counts one view. The counter bump is relaxed and
//! best-effort; a failed bump never fails the read.

use std::sync::Arc;

use crate::domain::discussion::DiscussionError;
use crate::domain::foundation::{DiscussionId, MemberId};
use crate::ports::{DiscussionDetail, DiscussionReader, DiscussionRepository};

/// Query handler for the discussion detail view.
pub struct GetDiscussionHandler {
    reader: Arc<dyn DiscussionReader>,
    repository: Arc<dyn DiscussionRepository>,
}

impl GetDiscussionHandler {
    pub fn new(
        reader: Arc<dyn DiscussionReader>,
        repository: Arc<dyn DiscussionRepository>,
    ) -> Self {
        Self { reader, repository }
    }

    pub async fn handle(
        &self,
        discussion_id: DiscussionId,
        viewer: Option<MemberId>,
    ) -> Result<DiscussionDetail, DiscussionError> {
        let detail = self
            .reader
            .get_detail(discussion_id, viewer)
            .await?
            .ok_or_else(|| DiscussionError::not_found(discussion_id))?;

        if let Err(err) = self.repository.increment_views(discussion_id).await {
            tracing::warn!(discussion_id = %discussion_id, error = %err, "view count bump failed");
        }

        Ok(detail)
    }
}
