//! Inbound webhook event payloads.
//!
//! Typed views over the GitHub webhook JSON bodies this service reacts to:
//! `projects_v2_item` (created/edited) and the legacy `issues` (opened) path.
//! Only the fields the reconciliation core consumes are modeled; everything
//! else in the delivery is ignored at deserialization time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A `projects_v2_item` webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectItemEvent {
    /// Webhook action: `created`, `edited`, ...
    pub action: String,

    /// The board item the event is about.
    #[serde(rename = "projects_v2_item")]
    pub item: ProjectItem,

    /// Present on `edited` deliveries that carry a field transition.
    #[serde(default)]
    pub changes: Option<EventChanges>,
}

/// The board item record inside a `projects_v2_item` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectItem {
    pub id: u64,

    /// Opaque reference to the underlying content node. Absent for draft
    /// items, which have no linked issue and are never synced.
    #[serde(default)]
    pub content_node_id: Option<String>,

    /// `Issue`, `PullRequest` or `DraftIssue`.
    #[serde(default)]
    pub content_type: Option<String>,

    /// Current field values of the item, when the delivery includes them.
    #[serde(default)]
    pub field_values: Vec<ItemFieldValue>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectItem {
    /// Whether the item has a linked content node to resolve.
    pub fn has_content(&self) -> bool {
        self.content_node_id
            .as_deref()
            .is_some_and(|node| !node.is_empty())
    }
}

/// One current field value on a board item: field name plus the selected
/// option's name, if the field holds a selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFieldValue {
    pub field_name: String,

    #[serde(default)]
    pub option_name: Option<String>,
}

/// The `changes` block of an `edited` delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventChanges {
    #[serde(default)]
    pub field_value: Option<FieldChange>,
}

/// A single field transition: which field changed, its kind, and the
/// before/after values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldChange {
    #[serde(default)]
    pub field_name: String,

    /// Field kind as reported by the source: `single_select`, `text`, ...
    #[serde(default)]
    pub field_type: String,

    #[serde(default)]
    pub from: Option<FieldValuePayload>,

    #[serde(default)]
    pub to: Option<FieldValuePayload>,
}

/// A field value inside a change record. The source sends either a bare
/// primitive or an object carrying a `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValuePayload {
    /// Option-shaped value, e.g. a single-select choice.
    Option {
        name: String,
        #[serde(default)]
        id: Option<String>,
    },
    /// Bare primitive (text field edits, number fields, ...).
    Scalar(serde_json::Value),
}

impl FieldValuePayload {
    /// The option name, if this value is option-shaped.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Option { name, .. } => Some(name),
            Self::Scalar(_) => None,
        }
    }
}

/// An `issues` webhook delivery (legacy creation path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: IssuePayload,
    pub repository: RepositoryPayload,
}

/// The issue record inside an `issues` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuePayload {
    pub number: u64,
    pub title: String,

    /// First comment; may be null for issues opened without a body.
    #[serde(default)]
    pub body: Option<String>,
}

/// Repository block of an `issues` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryPayload {
    pub name: String,
    pub owner: OwnerPayload,
}

/// Repository owner block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerPayload {
    pub login: String,
}
