//! Domain models.

pub mod config;
pub mod event;
pub mod issue;
pub mod status;
pub mod work_item;

pub use config::{
    Config, GithubConfig, LoggingConfig, ServerConfig, StatusConfig, TrackerConfig,
};
pub use event::{
    EventChanges, FieldChange, FieldValuePayload, IssuePayload, IssuesEvent, ItemFieldValue,
    OwnerPayload, ProjectItem, ProjectItemEvent, RepositoryPayload,
};
pub use issue::{IssueMetadata, RepositoryRef};
pub use status::{BoardColumn, StatusVocabulary};
pub use work_item::{
    parse_tags, system_fields, ItemIdentity, NewWorkItem, WorkItem, IMPORT_TAG,
    MISSING_COLUMN_TAG_PREFIX,
};
