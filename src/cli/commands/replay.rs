//! `replay`: feed a saved webhook payload through the core once.
//!
//! The core never retries on its own; replaying a delivery is the manual
//! recovery path when an event failed or was missed.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::infrastructure::webhook::{dispatch, DispatchOutcome};

use super::{build_sync_service, load_config};

pub async fn execute(event: &str, payload_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    crate::cli::init_logging(&config.logging);

    let raw = std::fs::read_to_string(payload_path)
        .with_context(|| format!("Failed to read payload from {}", payload_path.display()))?;
    let payload: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Payload in {} is not valid JSON", payload_path.display()))?;

    let sync = build_sync_service(&config)?;

    match dispatch(&sync, event, &payload).await? {
        DispatchOutcome::Synced(Some(item)) => {
            println!("synced: work item {} ({})", item.id, item.title);
        }
        DispatchOutcome::Synced(None) => {
            println!("nothing to sync: item has no linked issue");
        }
        DispatchOutcome::Ignored => {
            println!("ignored: event '{event}' is not handled");
        }
    }

    Ok(())
}
