//! Port for work item operations in the tracker.

use async_trait::async_trait;

use crate::domain::models::{NewWorkItem, WorkItem};

/// Errors from the tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Credentials were rejected.
    #[error("tracker rejected credentials")]
    Unauthorized,

    /// The addressed resource does not exist.
    #[error("tracker resource not found: {0}")]
    NotFound(String),

    /// The tracker answered with a non-success status.
    #[error("tracker API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure reaching the tracker.
    #[error("tracker transport error: {0}")]
    Transport(String),

    /// The tracker answered with a body this client could not interpret.
    #[error("unexpected tracker response: {0}")]
    InvalidResponse(String),
}

/// Port trait for work item storage in the tracker.
///
/// Covers the four remote operations the reconciliation core needs: the
/// tag-scoped identity query, creation, a full fetch (for board-column
/// field discovery), and a single-field update.
#[async_trait]
pub trait WorkItemRepository: Send + Sync {
    /// Find the first work item of the configured type whose tags contain
    /// `tag`. Multiple matches are not treated as an error; the first row
    /// wins. `None` signals "create new", not a failure.
    async fn find_first_by_tag(&self, tag: &str) -> Result<Option<WorkItem>, TrackerError>;

    /// Create a work item of the configured type.
    async fn create(&self, item: &NewWorkItem) -> Result<WorkItem, TrackerError>;

    /// Fetch a work item with its full field map.
    async fn get(&self, id: i64) -> Result<WorkItem, TrackerError>;

    /// Patch a single field by its tracker reference name.
    async fn update_field(
        &self,
        id: i64,
        field: &str,
        value: &str,
    ) -> Result<WorkItem, TrackerError>;
}
