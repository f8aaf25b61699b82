//! CLI command implementations.

pub mod replay;
pub mod serve;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::domain::models::{Config, StatusVocabulary};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::github::GithubGraphqlClient;
use crate::infrastructure::tracker::AzureBoardsClient;
use crate::services::{
    ColumnLocator, IdentityResolver, StatusExtractor, SyncService, WorkItemWriter,
};

/// Load configuration, from an explicit file when one was given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Wire the reconciliation core onto real clients.
///
/// One tracker client instance backs both tracker ports; all components
/// receive their collaborators explicitly.
pub(crate) fn build_sync_service(config: &Config) -> Result<Arc<SyncService>> {
    let source = Arc::new(GithubGraphqlClient::new(&config.github)?);
    let tracker = Arc::new(AzureBoardsClient::new(&config.tracker)?);

    let extractor = StatusExtractor::new(StatusVocabulary::new(config.status.columns.clone()));
    let resolver = IdentityResolver::new(tracker.clone());
    let locator = ColumnLocator::new(tracker.clone());
    let writer = WorkItemWriter::new(tracker, locator, config.status.state_mapping.clone());

    Ok(Arc::new(SyncService::new(
        source, extractor, resolver, writer,
    )))
}
