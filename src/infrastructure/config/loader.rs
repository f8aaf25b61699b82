use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Tracker {0} cannot be empty")]
    EmptyTrackerScope(&'static str),

    #[error("Webhook path must start with '/': {0}")]
    InvalidWebhookPath(String),

    #[error("Status vocabulary cannot be empty")]
    EmptyStatusVocabulary,

    #[error("State mapping entry '{0}' is not in the status vocabulary")]
    UnknownMappedColumn(String),

    #[error("Invalid timeout: {0}. Must be at least 1 second")]
    InvalidTimeout(u64),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .boardsync/config.yaml (project config)
    /// 3. .boardsync/local.yaml (local overrides, optional)
    /// 4. Environment variables (BOARDSYNC_* prefix, highest priority)
    ///
    /// Tokens are expected from the environment
    /// (`BOARDSYNC_TRACKER__TOKEN`, `BOARDSYNC_GITHUB__TOKEN`).
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".boardsync/config.yaml"))
            .merge(Yaml::file(".boardsync/local.yaml"))
            .merge(Env::prefixed("BOARDSYNC_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("BOARDSYNC_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.tracker.project.is_empty() {
            return Err(ConfigError::EmptyTrackerScope("project"));
        }
        if config.tracker.team.is_empty() {
            return Err(ConfigError::EmptyTrackerScope("team"));
        }
        if config.tracker.board.is_empty() {
            return Err(ConfigError::EmptyTrackerScope("board"));
        }
        if config.tracker.work_item_type.is_empty() {
            return Err(ConfigError::EmptyTrackerScope("work_item_type"));
        }

        if config.tracker.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.tracker.timeout_secs));
        }
        if config.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.github.timeout_secs));
        }

        if !config.server.webhook_path.starts_with('/') {
            return Err(ConfigError::InvalidWebhookPath(
                config.server.webhook_path.clone(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.status.columns.is_empty() {
            return Err(ConfigError::EmptyStatusVocabulary);
        }
        for column in config.status.state_mapping.keys() {
            if !config.status.columns.contains(column) {
                return Err(ConfigError::UnknownMappedColumn(column.clone()));
            }
        }

        Ok(())
    }
}
