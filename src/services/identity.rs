//! Identity resolution: does a work item already exist for an issue?

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::models::{ItemIdentity, WorkItem};
use crate::domain::ports::{TrackerError, WorkItemRepository};

/// Looks up previously created work items by their identity tag.
///
/// The `{owner}/{repo}#{number}` tag is the durable cross-system key; at
/// most one work item should carry it. The resolver does not enforce
/// uniqueness - if the tracker returns several rows, the first wins.
pub struct IdentityResolver {
    work_items: Arc<dyn WorkItemRepository>,
}

impl IdentityResolver {
    pub fn new(work_items: Arc<dyn WorkItemRepository>) -> Self {
        Self { work_items }
    }

    /// Find the work item tracked for `identity`, if one exists.
    ///
    /// Absence is not an error; it signals "create new".
    #[instrument(skip(self), fields(identity = %identity), err)]
    pub async fn find_existing(
        &self,
        identity: &ItemIdentity,
    ) -> Result<Option<WorkItem>, TrackerError> {
        let tag = identity.tag();
        let found = self.work_items.find_first_by_tag(&tag).await?;

        match &found {
            Some(item) => debug!(work_item_id = item.id, "identity already tracked"),
            None => debug!("identity not tracked yet"),
        }

        Ok(found)
    }
}
