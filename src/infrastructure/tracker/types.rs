//! Wire types for the tracker's REST surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::models::{parse_tags, system_fields, NewWorkItem, WorkItem};

/// One operation of a JSON Patch document
/// (`application/json-patch+json`), the tracker's write format.
#[derive(Debug, Clone, Serialize)]
pub struct PatchOperation {
    pub op: &'static str,
    pub path: String,
    pub value: Value,
}

impl PatchOperation {
    /// An `add` against a `/fields/...` path.
    pub fn add_field(field: &str, value: impl Into<Value>) -> Self {
        Self {
            op: "add",
            path: format!("/fields/{field}"),
            value: value.into(),
        }
    }
}

/// Build the patch document creating a work item.
pub fn creation_patch(item: &NewWorkItem) -> Vec<PatchOperation> {
    let mut document = vec![
        PatchOperation::add_field(system_fields::TITLE, item.title.clone()),
        PatchOperation::add_field(system_fields::DESCRIPTION, item.description.clone()),
        PatchOperation::add_field(system_fields::TAGS, item.tags_field()),
    ];

    if let Some(state) = &item.state {
        document.push(PatchOperation::add_field(system_fields::STATE, state.clone()));
    }

    document
}

/// WIQL query request body.
#[derive(Debug, Serialize)]
pub struct WiqlRequest {
    pub query: String,
}

/// WIQL query response: flat references to matching work items.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WiqlResponse {
    #[serde(default)]
    pub work_items: Vec<WorkItemRef>,
}

#[derive(Debug, Deserialize)]
pub struct WorkItemRef {
    pub id: i64,
}

/// A work item as the tracker returns it: id plus the raw field map.
#[derive(Debug, Deserialize)]
pub struct WorkItemResponse {
    pub id: i64,

    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl WorkItemResponse {
    /// Lift the system fields out of the raw map into the domain model.
    pub fn into_work_item(self) -> WorkItem {
        let string_field = |name: &str| {
            self.fields
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let title = string_field(system_fields::TITLE);
        let description = string_field(system_fields::DESCRIPTION);
        let tags = parse_tags(&string_field(system_fields::TAGS));

        WorkItem {
            id: self.id,
            title,
            description,
            tags,
            fields: self.fields,
        }
    }
}

/// Envelope of list responses (`{ count, value: [...] }`).
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}
