//! `serve`: run the webhook listener.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::infrastructure::webhook;

use super::{build_sync_service, load_config};

pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    crate::cli::init_logging(&config.logging);

    info!(
        organization = %config.tracker.organization_url,
        project = %config.tracker.project,
        board = %config.tracker.board,
        "starting boardsync"
    );

    let sync = build_sync_service(&config)?;
    webhook::serve(&config.server, sync).await
}
