//! The webhook listener.
//!
//! A single POST route receives GitHub deliveries, names the event from the
//! `X-GitHub-Event` header, and hands the body to the dispatcher. Delivery
//! verification and redelivery are the webhook framework's concern: ignored
//! events are answered 200 so GitHub does not redeliver them, failed
//! reconciliations are answered 500 so it does.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::{error, info, warn};

use super::dispatch::{dispatch, DispatchError, DispatchOutcome};
use crate::domain::models::ServerConfig;
use crate::services::SyncService;

#[derive(Clone)]
struct AppState {
    sync: Arc<SyncService>,
}

/// Build the webhook router.
pub fn router(sync: Arc<SyncService>, webhook_path: &str) -> Router {
    Router::new()
        .route(webhook_path, post(handle_webhook))
        .with_state(AppState { sync })
}

/// Bind and serve the webhook listener until the process is stopped.
pub async fn serve(config: &ServerConfig, sync: Arc<SyncService>) -> Result<()> {
    let app = router(sync, &config.webhook_path);

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, path = %config.webhook_path, "webhook listener ready");

    axum::serve(listener, app)
        .await
        .context("Webhook listener terminated")?;

    Ok(())
}

async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> StatusCode {
    let Some(event_name) = headers
        .get("x-github-event")
        .and_then(|value| value.to_str().ok())
    else {
        warn!("delivery without X-GitHub-Event header");
        return StatusCode::BAD_REQUEST;
    };

    match dispatch(&state.sync, event_name, &payload).await {
        Ok(DispatchOutcome::Synced(Some(item))) => {
            info!(event = event_name, work_item_id = item.id, "delivery synced");
            StatusCode::OK
        }
        Ok(DispatchOutcome::Synced(None) | DispatchOutcome::Ignored) => StatusCode::OK,
        Err(DispatchError::Malformed { event, source }) => {
            warn!(%event, %source, "malformed delivery");
            StatusCode::BAD_REQUEST
        }
        Err(DispatchError::Sync(err)) => {
            error!(event = event_name, %err, "reconciliation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
