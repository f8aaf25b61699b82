//! Port for resolving issue metadata from the source system.

use async_trait::async_trait;

use crate::domain::models::IssueMetadata;

/// Errors from the issue source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The content reference resolved to nothing syncable. Query failures
    /// and missing nodes both normalize here; the reconciliation run is
    /// aborted either way and the next event is the retry vector.
    #[error("no issue found for content reference {0}")]
    NotFound(String),

    /// Transport-level failure reaching the source.
    #[error("source transport error: {0}")]
    Transport(String),

    /// The source answered with a non-success status.
    #[error("source API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Port trait for the system of record that issues live in.
///
/// Implementations resolve an opaque content reference (the node behind a
/// board item) to the issue's minimal identity. Results are never cached;
/// every sync fetches fresh.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Resolve a content reference to issue metadata.
    ///
    /// # Errors
    /// - `SourceError::NotFound` - the reference does not resolve to an issue
    /// - `SourceError::Transport` - the source could not be reached
    /// - `SourceError::Api` - the source rejected the query
    async fn fetch_issue_metadata(&self, content_ref: &str) -> Result<IssueMetadata, SourceError>;
}
