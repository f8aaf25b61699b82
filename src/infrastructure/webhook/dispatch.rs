//! Webhook event dispatch into the reconciliation core.

use serde_json::Value;
use tracing::debug;

use crate::domain::errors::SyncError;
use crate::domain::models::{IssuesEvent, ProjectItemEvent, WorkItem};
use crate::services::SyncService;

/// Events this service reacts to; everything else is acknowledged and
/// dropped.
const PROJECT_ITEM_EVENT: &str = "projects_v2_item";
const ISSUES_EVENT: &str = "issues";

/// What happened to a delivered event.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The event was reconciled. `None` means it concerned a draft item.
    Synced(Option<WorkItem>),

    /// The event or action is not one this service handles.
    Ignored,
}

/// Dispatch failures.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The payload did not have the shape its event name promises.
    #[error("malformed {event} payload: {source}")]
    Malformed {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    /// The reconciliation run failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Route one delivered event to the reconciliation core.
///
/// Both `projects_v2_item` actions run the same sync; they only differ in
/// what target-column input the payload can supply. The legacy `issues`
/// path covers repositories whose issues are not on a board yet.
pub async fn dispatch(
    sync: &SyncService,
    event_name: &str,
    payload: &Value,
) -> Result<DispatchOutcome, DispatchError> {
    match event_name {
        PROJECT_ITEM_EVENT => {
            let event: ProjectItemEvent =
                serde_json::from_value(payload.clone()).map_err(|source| {
                    DispatchError::Malformed {
                        event: event_name.to_string(),
                        source,
                    }
                })?;

            match event.action.as_str() {
                "created" | "edited" => {
                    let item = sync.sync(&event).await?;
                    Ok(DispatchOutcome::Synced(item))
                }
                action => {
                    debug!(action, "ignoring project item action");
                    Ok(DispatchOutcome::Ignored)
                }
            }
        }
        ISSUES_EVENT => {
            let event: IssuesEvent =
                serde_json::from_value(payload.clone()).map_err(|source| {
                    DispatchError::Malformed {
                        event: event_name.to_string(),
                        source,
                    }
                })?;

            if event.action == "opened" {
                let item = sync.sync_issue(&event).await?;
                Ok(DispatchOutcome::Synced(item))
            } else {
                debug!(action = %event.action, "ignoring issues action");
                Ok(DispatchOutcome::Ignored)
            }
        }
        name => {
            debug!(event = name, "ignoring event");
            Ok(DispatchOutcome::Ignored)
        }
    }
}
