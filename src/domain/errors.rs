//! Domain errors for the sync core.

use thiserror::Error;

use crate::domain::ports::{SourceError, TrackerError};

/// Errors that abort a reconciliation run.
///
/// Only remote failures surface here. Absence of a work item drives branch
/// selection instead of erroring, an unrecognized field change falls back to
/// the current-state scan, and a missing board-column field downgrades a
/// column move to a logged no-op.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("could not resolve issue metadata: {0}")]
    Source(#[from] SourceError),

    #[error("tracker operation failed: {0}")]
    Tracker(#[from] TrackerError),
}

pub type SyncResult<T> = Result<T, SyncError>;
