#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{
    is_unresolved_placeholder, validate_credential, validate_non_empty_string, validate_range,
    validate_url, Validate,
};
use std::path::Path;
use toml_config::TomlConfig;

pub const NOTION_API_KEY_VAR: &str = "NOTION_API_KEY";
pub const NOTION_DATABASE_ID_VAR: &str = "NOTION_DATABASE_ID";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_JOBS_FILE: &str = "jobs.txt";

/// Everything the tool needs, resolved once at startup and passed by
/// reference into each component constructor.
#[derive(Clone)]
pub struct TrackerConfig {
    pub notion_api_key: String,
    pub notion_database_id: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub notion_base_url: String,
    pub notion_version: String,
    pub request_timeout_secs: u64,
    pub jobs_file: String,
}

impl std::fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("notion_api_key", &"***")
            .field("notion_database_id", &self.notion_database_id)
            .field("openai_api_key", &"***")
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("notion_base_url", &self.notion_base_url)
            .field("notion_version", &self.notion_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("jobs_file", &self.jobs_file)
            .finish()
    }
}

impl TrackerConfig {
    /// Loads `.env`, the optional TOML file and the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        // .env 不存在時直接略過
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let file = match config_file {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merges file values over `env` lookups, applies defaults, validates.
    pub fn resolve<E>(file: TomlConfig, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let secret = |from_file: Option<String>, var: &str| -> Result<String> {
            from_file
                .filter(|value| !is_unresolved_placeholder(value) && !value.trim().is_empty())
                .or_else(|| env(var))
                .ok_or_else(|| TrackerError::MissingConfigError {
                    field: var.to_string(),
                })
        };

        let config = Self {
            notion_api_key: secret(file.notion.api_key, NOTION_API_KEY_VAR)?,
            notion_database_id: secret(file.notion.database_id, NOTION_DATABASE_ID_VAR)?,
            openai_api_key: secret(file.openai.api_key, OPENAI_API_KEY_VAR)?,
            openai_model: file
                .openai
                .model
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: file
                .openai
                .base_url
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            notion_base_url: file
                .notion
                .base_url
                .unwrap_or_else(|| DEFAULT_NOTION_BASE_URL.to_string()),
            notion_version: file
                .notion
                .version
                .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string()),
            request_timeout_secs: file.fetch.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
            jobs_file: file
                .batch
                .jobs_file
                .unwrap_or_else(|| DEFAULT_JOBS_FILE.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}

impl Validate for TrackerConfig {
    fn validate(&self) -> Result<()> {
        validate_credential(NOTION_API_KEY_VAR, &self.notion_api_key)?;
        validate_credential(NOTION_DATABASE_ID_VAR, &self.notion_database_id)?;
        validate_credential(OPENAI_API_KEY_VAR, &self.openai_api_key)?;
        validate_non_empty_string("openai.model", &self.openai_model)?;
        validate_url("openai.base_url", &self.openai_base_url)?;
        validate_url("notion.base_url", &self.notion_base_url)?;
        validate_non_empty_string("notion.version", &self.notion_version)?;
        validate_range("fetch.timeout_seconds", self.request_timeout_secs, 1, 300)?;
        validate_non_empty_string("batch.jobs_file", &self.jobs_file)?;
        Ok(())
    }
}
