//! Wire types for the GitHub GraphQL node query.

use serde::{Deserialize, Serialize};

use crate::domain::models::{IssueMetadata, RepositoryRef};

/// Query resolving an opaque content node to its issue identity. The inline
/// fragment means non-issue nodes (pull requests, drafts) come back empty.
pub const ISSUE_NODE_QUERY: &str = "\
query($id: ID!) { \
node(id: $id) { \
... on Issue { title body number repository { name owner { login } } } \
} }";

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: NodeVariables<'a>,
}

#[derive(Debug, Serialize)]
pub struct NodeVariables<'a> {
    pub id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<NodeData>,

    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub node: Option<IssueNode>,
}

/// The resolved node. All fields optional: a node of another type
/// deserializes to an empty object.
#[derive(Debug, Deserialize)]
pub struct IssueNode {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub number: Option<u64>,

    #[serde(default)]
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryNode {
    pub name: String,
    pub owner: OwnerNode,
}

#[derive(Debug, Deserialize)]
pub struct OwnerNode {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

impl IssueNode {
    /// Collapse the optional node fields into issue metadata, or `None`
    /// when the node was not an issue.
    pub fn into_metadata(self) -> Option<IssueMetadata> {
        let repository = self.repository?;
        Some(IssueMetadata {
            title: self.title?,
            body: self.body.unwrap_or_default(),
            number: self.number?,
            repository: RepositoryRef {
                owner: repository.owner.login,
                name: repository.name,
            },
        })
    }
}
