//! Target-column derivation from an inbound event.

use tracing::debug;

use crate::domain::models::{ProjectItemEvent, StatusVocabulary};

/// Field kind of a board status transition.
const SINGLE_SELECT: &str = "single_select";

/// Derives the intended target column for an event, gated by the
/// recognized status vocabulary.
///
/// Priority order:
/// 1. An explicit single-select change record whose `to` value names a
///    recognized column.
/// 2. A scan of the item's current field values for the first recognized
///    option name (creation events carry no change record).
/// 3. `None` - the sync proceeds without moving any column.
#[derive(Debug, Clone)]
pub struct StatusExtractor {
    vocabulary: StatusVocabulary,
}

impl StatusExtractor {
    pub fn new(vocabulary: StatusVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Compute the target column for an event, if any.
    pub fn extract(&self, event: &ProjectItemEvent) -> Option<String> {
        if let Some(target) = self.from_change_record(event) {
            debug!(column = %target, "target column from explicit field change");
            return Some(target);
        }

        if let Some(target) = self.from_current_values(event) {
            debug!(column = %target, "target column from current field values");
            return Some(target);
        }

        None
    }

    /// Step 1: the explicit transition, when it is a recognized status move.
    ///
    /// Title renames and other field edits also arrive as change records;
    /// the single-select kind plus the vocabulary check filter those out
    /// rather than aborting the run.
    fn from_change_record(&self, event: &ProjectItemEvent) -> Option<String> {
        let change = event.changes.as_ref()?.field_value.as_ref()?;
        if change.field_type != SINGLE_SELECT {
            return None;
        }

        let to_name = change.to.as_ref()?.name()?;
        if self.vocabulary.contains(to_name) {
            Some(to_name.to_string())
        } else {
            debug!(
                field = %change.field_name,
                to = %to_name,
                "change target not in status vocabulary, falling back"
            );
            None
        }
    }

    /// Step 2: first current field value carrying a recognized option name.
    ///
    /// Two matching values would mean a misconfigured board; first match
    /// wins and no further validation is attempted.
    fn from_current_values(&self, event: &ProjectItemEvent) -> Option<String> {
        event
            .item
            .field_values
            .iter()
            .filter_map(|value| value.option_name.as_deref())
            .find(|name| self.vocabulary.contains(name))
            .map(ToString::to_string)
    }
}
