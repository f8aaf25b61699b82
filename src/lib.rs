//! Boardsync - GitHub Project board to work item tracker synchronizer
//!
//! Boardsync listens for GitHub webhook deliveries about Project board
//! items and reconciles them into an Azure Boards-style tracker: each
//! issue gets at most one work item, keyed by a durable identity tag, and
//! board status changes move the work item to the matching column.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain`): models, port traits, and the error
//!   taxonomy
//! - **Service Layer** (`services`): the reconciliation core and its
//!   collaborators
//! - **Infrastructure Layer** (`infrastructure`): GitHub and tracker
//!   clients, the webhook listener, configuration
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use boardsync::infrastructure::config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     // build clients and serve the webhook listener
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{SyncError, SyncResult};
pub use domain::models::{
    Config, IssueMetadata, IssuesEvent, ItemIdentity, ProjectItemEvent, StatusVocabulary, WorkItem,
};
pub use domain::ports::{BoardColumns, IssueSource, SourceError, TrackerError, WorkItemRepository};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{StatusExtractor, SyncService, WorkItemWriter};
