//! Resolved issue identity from the source system.

use serde::{Deserialize, Serialize};

/// Minimal identity of the issue behind a board item.
///
/// Fetched fresh on every sync, never cached locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMetadata {
    pub title: String,

    /// Issue body; empty string when the issue was opened without one.
    pub body: String,

    pub number: u64,

    pub repository: RepositoryRef,
}

/// Owning repository of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Owner login, e.g. `acme`.
    pub owner: String,

    /// Repository name, e.g. `widgets`.
    pub name: String,
}

impl IssueMetadata {
    /// Full `owner/repo` slug of the owning repository.
    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.repository.owner, self.repository.name)
    }
}
