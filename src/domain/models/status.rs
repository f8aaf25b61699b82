//! Board columns and the recognized status vocabulary.

use serde::{Deserialize, Serialize};

/// A named column on the tracker's board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    /// Tracker-internal column id, when the API reports one.
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,
}

/// The closed set of column names eligible for cross-system sync.
///
/// A target column derived from an event is honored only if it belongs to
/// this vocabulary; everything else is an unrelated field edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVocabulary(Vec<String>);

impl StatusVocabulary {
    pub fn new(columns: Vec<String>) -> Self {
        Self(columns)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self(
            [
                "Assigned by Sam",
                "Repeat Tasks",
                "Not Yet Started",
                "In Progress",
                "Done",
            ]
            .map(String::from)
            .to_vec(),
        )
    }
}
