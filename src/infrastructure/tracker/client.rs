//! Azure Boards REST client implementing the tracker ports.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use super::error::{classify_status, transport};
use super::types::{
    creation_patch, ListResponse, PatchOperation, WiqlRequest, WiqlResponse, WorkItemResponse,
};
use crate::domain::models::{BoardColumn, NewWorkItem, TrackerConfig, WorkItem};
use crate::domain::ports::{BoardColumns, TrackerError, WorkItemRepository};

const API_VERSION: &str = "7.1";
const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// HTTP client for the tracker's work item and board APIs.
///
/// One instance serves both tracker ports; it is constructed once from
/// configuration and injected wherever tracker access is needed. PAT
/// authentication uses basic auth with an empty username. No retry layer:
/// a failed call aborts the current reconciliation.
pub struct AzureBoardsClient {
    http_client: ReqwestClient,
    organization_url: String,
    project: String,
    team: String,
    board: String,
    work_item_type: String,
    token: String,
}

impl AzureBoardsClient {
    /// Build a client from configuration.
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .build()
            .context("Failed to build tracker HTTP client")?;

        Ok(Self {
            http_client,
            organization_url: config.organization_url.trim_end_matches('/').to_string(),
            project: config.project.clone(),
            team: config.team.clone(),
            board: config.board.clone(),
            work_item_type: config.work_item_type.clone(),
            token: config.token.clone(),
        })
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        // PAT auth: empty username, token as password.
        request
            .basic_auth("", Some(&self.token))
            .query(&[("api-version", API_VERSION)])
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, TrackerError> {
        let status = response.status();

        // 203 is the tracker's HTML sign-in page for rejected PATs; it
        // counts as 2xx so it needs an explicit check.
        if status == StatusCode::NON_AUTHORITATIVE_INFORMATION || !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            return Err(classify_status(status, body));
        }

        response
            .json()
            .await
            .map_err(|err| TrackerError::InvalidResponse(err.to_string()))
    }

    fn wiql_url(&self) -> String {
        format!(
            "{}/{}/_apis/wit/wiql",
            self.organization_url, self.project
        )
    }

    fn work_item_url(&self, id: i64) -> String {
        format!(
            "{}/{}/_apis/wit/workitems/{}",
            self.organization_url, self.project, id
        )
    }

    fn create_url(&self) -> String {
        format!(
            "{}/{}/_apis/wit/workitems/${}",
            self.organization_url, self.project, self.work_item_type
        )
    }

    fn board_columns_url(&self) -> String {
        format!(
            "{}/{}/{}/_apis/work/boards/{}/columns",
            self.organization_url, self.project, self.team, self.board
        )
    }
}

/// Escape a string literal for embedding in a WIQL query.
fn escape_wiql(value: &str) -> String {
    value.replace('\'', "''")
}

#[async_trait]
impl WorkItemRepository for AzureBoardsClient {
    #[instrument(skip(self), err)]
    async fn find_first_by_tag(&self, tag: &str) -> Result<Option<WorkItem>, TrackerError> {
        let query = format!(
            "SELECT [System.Id] FROM WorkItems \
             WHERE [System.TeamProject] = '{}' \
             AND [System.WorkItemType] = '{}' \
             AND [System.Tags] CONTAINS '{}'",
            escape_wiql(&self.project),
            escape_wiql(&self.work_item_type),
            escape_wiql(tag),
        );

        let response = self
            .authed(self.http_client.post(self.wiql_url()))
            .json(&WiqlRequest { query })
            .send()
            .await
            .map_err(transport)?;

        let wiql: WiqlResponse = Self::parse(response).await?;

        // At most one row is expected per identity; if the tracker returns
        // several, the first wins.
        let Some(first) = wiql.work_items.first() else {
            return Ok(None);
        };
        debug!(matches = wiql.work_items.len(), id = first.id, "tag query hit");

        let item = self.get(first.id).await?;
        Ok(Some(item))
    }

    #[instrument(skip(self, item), fields(title = %item.title), err)]
    async fn create(&self, item: &NewWorkItem) -> Result<WorkItem, TrackerError> {
        let document = creation_patch(item);

        let response = self
            .authed(self.http_client.post(self.create_url()))
            .header(header::CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
            .json(&document)
            .send()
            .await
            .map_err(transport)?;

        let created: WorkItemResponse = Self::parse(response).await?;
        Ok(created.into_work_item())
    }

    #[instrument(skip(self), err)]
    async fn get(&self, id: i64) -> Result<WorkItem, TrackerError> {
        let response = self
            .authed(self.http_client.get(self.work_item_url(id)))
            .send()
            .await
            .map_err(transport)?;

        let item: WorkItemResponse = Self::parse(response).await?;
        Ok(item.into_work_item())
    }

    #[instrument(skip(self), err)]
    async fn update_field(
        &self,
        id: i64,
        field: &str,
        value: &str,
    ) -> Result<WorkItem, TrackerError> {
        let document = vec![PatchOperation::add_field(field, value)];

        let response = self
            .authed(self.http_client.patch(self.work_item_url(id)))
            .header(header::CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
            .json(&document)
            .send()
            .await
            .map_err(transport)?;

        let updated: WorkItemResponse = Self::parse(response).await?;
        Ok(updated.into_work_item())
    }
}

#[async_trait]
impl BoardColumns for AzureBoardsClient {
    #[instrument(skip(self), err)]
    async fn list_columns(&self) -> Result<Vec<BoardColumn>, TrackerError> {
        let response = self
            .authed(self.http_client.get(self.board_columns_url()))
            .send()
            .await
            .map_err(transport)?;

        let columns: ListResponse<BoardColumn> = Self::parse(response).await?;
        Ok(columns.value)
    }
}
