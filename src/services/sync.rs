//! The reconciliation core.
//!
//! One idempotent `sync` operation per inbound event: determine the target
//! column, resolve the issue's identity in the tracker, then either move
//! the existing work item or create a new one. Both the `created` and
//! `edited` triggers run the same algorithm - a missed creation event is
//! self-healed by the next edit re-running the same reconciliation.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::errors::SyncResult;
use crate::domain::models::{
    IssueMetadata, IssuesEvent, ItemIdentity, ProjectItemEvent, RepositoryRef, WorkItem,
};
use crate::domain::ports::IssueSource;

use super::identity::IdentityResolver;
use super::status_extractor::StatusExtractor;
use super::writer::WorkItemWriter;

/// Orchestrates one reconciliation run per inbound event.
///
/// Every remote step is sequential; a failure at any step aborts the run
/// without retry - the next event for the same item is the retry vector.
pub struct SyncService {
    issue_source: Arc<dyn IssueSource>,
    extractor: StatusExtractor,
    resolver: IdentityResolver,
    writer: WorkItemWriter,
}

impl SyncService {
    pub fn new(
        issue_source: Arc<dyn IssueSource>,
        extractor: StatusExtractor,
        resolver: IdentityResolver,
        writer: WorkItemWriter,
    ) -> Self {
        Self {
            issue_source,
            extractor,
            resolver,
            writer,
        }
    }

    /// Reconcile a `projects_v2_item` event into the tracker.
    ///
    /// Returns the tracked work item, or `None` when the event concerns a
    /// draft item with no linked issue.
    #[instrument(skip_all, fields(action = %event.action, item_id = event.item.id), err)]
    pub async fn sync(&self, event: &ProjectItemEvent) -> SyncResult<Option<WorkItem>> {
        let Some(content_ref) = event.item.content_node_id.as_deref().filter(|r| !r.is_empty())
        else {
            debug!("item has no linked content, skipping");
            return Ok(None);
        };

        let metadata = self.issue_source.fetch_issue_metadata(content_ref).await?;
        let identity = ItemIdentity::from(&metadata);
        let target = self.extractor.extract(event);

        let item = self.reconcile(&metadata, &identity, target.as_deref()).await?;
        Ok(Some(item))
    }

    /// Reconcile a legacy `issues` (opened) event.
    ///
    /// The payload already carries the issue identity, so no metadata fetch
    /// is needed; with no field values to scan, the target column is always
    /// absent on this path.
    #[instrument(skip_all, fields(number = event.issue.number), err)]
    pub async fn sync_issue(&self, event: &IssuesEvent) -> SyncResult<Option<WorkItem>> {
        let metadata = IssueMetadata {
            title: event.issue.title.clone(),
            body: event.issue.body.clone().unwrap_or_default(),
            number: event.issue.number,
            repository: RepositoryRef {
                owner: event.repository.owner.login.clone(),
                name: event.repository.name.clone(),
            },
        };
        let identity = ItemIdentity::from(&metadata);

        let item = self.reconcile(&metadata, &identity, None).await?;
        Ok(Some(item))
    }

    /// The single idempotent reconciliation both triggers share.
    async fn reconcile(
        &self,
        metadata: &IssueMetadata,
        identity: &ItemIdentity,
        target: Option<&str>,
    ) -> SyncResult<WorkItem> {
        match self.resolver.find_existing(identity).await? {
            Some(existing) => {
                let item = match target {
                    Some(column) => self.writer.update_column(&existing, column).await?,
                    None => existing,
                };
                info!(
                    identity = %identity,
                    work_item_id = item.id,
                    target = target.unwrap_or("-"),
                    "reconciled onto existing work item"
                );
                Ok(item)
            }
            None => {
                let created = self.writer.create(metadata, identity, target).await?;
                info!(
                    identity = %identity,
                    work_item_id = created.id,
                    target = target.unwrap_or("-"),
                    "reconciled into new work item"
                );
                Ok(created)
            }
        }
    }
}
