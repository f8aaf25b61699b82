//! Tracker-side work item model and the cross-system identity tag.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::issue::IssueMetadata;

/// Tag present on every work item this service creates.
pub const IMPORT_TAG: &str = "GitHub Import";

/// Tag prefix marking a target column that did not exist on the board at
/// sync time.
pub const MISSING_COLUMN_TAG_PREFIX: &str = "Missing Column: ";

/// Tracker reference names of the fixed system fields this service writes.
/// The board-column field is deliberately absent: its name is discovered per
/// work item, not fixed.
pub mod system_fields {
    pub const TITLE: &str = "System.Title";
    pub const DESCRIPTION: &str = "System.Description";
    pub const TAGS: &str = "System.Tags";
    pub const STATE: &str = "System.State";
}

/// Substring identifying the board-column field among a work item's fields.
///
/// The tracker assigns the Kanban column field an arbitrary per-board name
/// (e.g. `WEF_<hash>_Kanban.Column`), so the field is discovered per work
/// item rather than addressed by a fixed schema name.
const KANBAN_COLUMN_MARKER: &str = "Kanban.Column";

/// The durable `{owner}/{repo}#{number}` identity linking a work item back
/// to its source issue. At most one work item exists per identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemIdentity {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl ItemIdentity {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// The identity tag as stored in the work item's tag set.
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

impl From<&IssueMetadata> for ItemIdentity {
    fn from(metadata: &IssueMetadata) -> Self {
        Self {
            owner: metadata.repository.owner.clone(),
            repo: metadata.repository.name.clone(),
            number: metadata.number,
        }
    }
}

/// A work item as held in the tracker.
///
/// `fields` carries the raw field map so callers can probe for
/// board-specific dynamic fields; the common system fields are lifted out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: i64,
    pub title: String,
    pub description: String,

    /// Parsed tag set (the tracker stores tags as one `; `-joined string).
    pub tags: Vec<String>,

    /// Full raw field map, keyed by tracker field reference name.
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl WorkItem {
    /// Discover the name of this work item's board-column field, if the
    /// board has assigned one.
    ///
    /// The companion `*.Done` split-column flag field also matches the
    /// marker substring and must not be selected.
    pub fn board_column_field(&self) -> Option<&str> {
        self.fields
            .keys()
            .find(|key| key.contains(KANBAN_COLUMN_MARKER) && !key.ends_with(".Done"))
            .map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Render the tag set back to the tracker's `; `-joined wire form.
    pub fn tags_field(&self) -> String {
        self.tags.join("; ")
    }
}

/// Split a tracker `System.Tags` value into individual tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Fields of a work item to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkItem {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,

    /// Optional `System.State` value, from the status-to-state mapping.
    pub state: Option<String>,
}

impl NewWorkItem {
    /// Tag set in the tracker's wire form.
    pub fn tags_field(&self) -> String {
        self.tags.join("; ")
    }
}
