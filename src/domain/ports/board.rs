//! Port for board column queries in the tracker.

use async_trait::async_trait;

use super::work_items::TrackerError;
use crate::domain::models::BoardColumn;

/// Port trait for the board's current column set.
///
/// Column existence is queried, never assumed; board administrators add and
/// remove columns out-of-band.
#[async_trait]
pub trait BoardColumns: Send + Sync {
    /// List the columns of the configured project/team/board.
    async fn list_columns(&self) -> Result<Vec<BoardColumn>, TrackerError>;
}
