//! ListDiscussionsHandler - cursor scroll over the debate list.

use std::sync::Arc;

use crate::domain::discussion::DiscussionError;
use crate::domain::foundation::{CursorPage, ScrollQuery};
use crate::ports::{DiscussionFilter, DiscussionReader, DiscussionSummary};

/// Query handler for the discussion list.
pub struct ListDiscussionsHandler {
    reader: Arc<dyn DiscussionReader>,
}

impl ListDiscussionsHandler {
    pub fn new(reader: Arc<dyn DiscussionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        filter: DiscussionFilter,
        query: ScrollQuery,
    ) -> Result<CursorPage<DiscussionSummary>, DiscussionError> {
        let page = self.reader.scroll(&filter, query).await?;
        Ok(page)
    }
}
