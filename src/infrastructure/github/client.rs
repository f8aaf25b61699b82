//! GitHub GraphQL client implementing the issue source port.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::types::{GraphqlRequest, GraphqlResponse, NodeVariables, ISSUE_NODE_QUERY};
use crate::domain::models::{GithubConfig, IssueMetadata};
use crate::domain::ports::{IssueSource, SourceError};

/// HTTP client for the GitHub GraphQL API.
///
/// Resolves content node references to issue metadata via a single `node`
/// query. Connection pooling comes from the shared `reqwest::Client`; there
/// is no retry layer - a failed fetch aborts the current reconciliation and
/// the next webhook delivery tries again.
pub struct GithubGraphqlClient {
    http_client: ReqwestClient,
    graphql_url: String,
}

impl GithubGraphqlClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Fails when the token is not a valid header value or the underlying
    /// HTTP client cannot be constructed.
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .context("GitHub token is not a valid header value")?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        // The GitHub API rejects requests without a user agent.
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("boardsync"),
        );

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .default_headers(headers)
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            http_client,
            graphql_url: config.graphql_url.clone(),
        })
    }
}

#[async_trait]
impl IssueSource for GithubGraphqlClient {
    #[instrument(skip(self), err)]
    async fn fetch_issue_metadata(&self, content_ref: &str) -> Result<IssueMetadata, SourceError> {
        let request = GraphqlRequest {
            query: ISSUE_NODE_QUERY,
            variables: NodeVariables { id: content_ref },
        };

        let response = self
            .http_client
            .post(&self.graphql_url)
            .json(&request)
            .send()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GraphqlResponse = response
            .json()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;

        // Query-level failures and missing nodes both normalize to absence:
        // the run aborts and the next event retries.
        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            warn!(
                content_ref,
                first_error = %errors[0].message,
                "GraphQL query returned errors"
            );
            return Err(SourceError::NotFound(content_ref.to_string()));
        }

        let metadata = body
            .data
            .and_then(|data| data.node)
            .and_then(super::types::IssueNode::into_metadata)
            .ok_or_else(|| SourceError::NotFound(content_ref.to_string()))?;

        debug!(
            number = metadata.number,
            repo = %metadata.repo_slug(),
            "resolved issue metadata"
        );
        Ok(metadata)
    }
}
