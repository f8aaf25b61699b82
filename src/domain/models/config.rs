//! Application configuration model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Main configuration structure for boardsync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Tracker (Azure Boards) connection and scope.
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Source system (GitHub) query endpoint.
    #[serde(default)]
    pub github: GithubConfig,

    /// Webhook listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Status vocabulary and state mapping.
    #[serde(default)]
    pub status: StatusConfig,
}

/// Tracker connection and the fixed single-tenant scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrackerConfig {
    /// Organization base URL.
    #[serde(default = "default_organization_url")]
    pub organization_url: String,

    /// Project that owns the synced work items.
    #[serde(default = "default_project")]
    pub project: String,

    /// Team whose board is consulted for columns.
    #[serde(default = "default_team")]
    pub team: String,

    /// Board name within the team.
    #[serde(default = "default_board")]
    pub board: String,

    /// Work item type created for imported issues.
    #[serde(default = "default_work_item_type")]
    pub work_item_type: String,

    /// Personal access token. Supplied via `BOARDSYNC_TRACKER__TOKEN`;
    /// never given a file default.
    #[serde(default)]
    pub token: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_organization_url() -> String {
    "https://dev.azure.com/ursa-minus".to_string()
}

fn default_project() -> String {
    "ursa".to_string()
}

fn default_team() -> String {
    "ursa Team".to_string()
}

fn default_board() -> String {
    "Issues".to_string()
}

fn default_work_item_type() -> String {
    "Issue".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            organization_url: default_organization_url(),
            project: default_project(),
            team: default_team(),
            board: default_board(),
            work_item_type: default_work_item_type(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// GitHub GraphQL endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GithubConfig {
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,

    /// API token. Supplied via `BOARDSYNC_GITHUB__TOKEN`.
    #[serde(default)]
    pub token: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_graphql_url() -> String {
    "https://api.github.com/graphql".to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            graphql_url: default_graphql_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Webhook listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Path GitHub delivers webhooks to.
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_webhook_path() -> String {
    "/api/github/webhooks".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            webhook_path: default_webhook_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Status vocabulary and the status-to-tracker-state mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusConfig {
    /// Recognized column names, in board order.
    #[serde(default = "default_status_columns")]
    pub columns: Vec<String>,

    /// Column name to `System.State` value, applied when creating a work
    /// item whose target column maps.
    #[serde(default = "default_state_mapping")]
    pub state_mapping: HashMap<String, String>,
}

fn default_status_columns() -> Vec<String> {
    [
        "Assigned by Sam",
        "Repeat Tasks",
        "Not Yet Started",
        "In Progress",
        "Done",
    ]
    .map(String::from)
    .to_vec()
}

fn default_state_mapping() -> HashMap<String, String> {
    HashMap::from([
        ("Not Yet Started".to_string(), "New".to_string()),
        ("In Progress".to_string(), "Active".to_string()),
        ("Done".to_string(), "Closed".to_string()),
    ])
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            columns: default_status_columns(),
            state_mapping: default_state_mapping(),
        }
    }
}
