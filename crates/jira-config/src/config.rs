//! Configuration types and loading.
//!
//! The main entry point is [`JiraConfig`], loaded with [`load_config`] from
//! defaults, the YAML config file and `JIRA_*` environment variables (in
//! increasing priority).

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use jira_core::custom::FieldSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration could not be assembled from its sources.
    #[error("invalid configuration")]
    Load(#[from] figment::Error),

    /// A required value is missing.
    #[error("missing configuration value '{key}' (set it in {hint})")]
    Missing {
        /// The configuration key.
        key: String,
        /// Where the user can provide it.
        hint: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "JIRA_";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// How requests authenticate against Jira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// HTTP basic auth with login and API token (Jira cloud).
    #[default]
    Basic,
    /// Personal access token (Jira server / data center).
    Bearer,
}

/// Project section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project key used for new issues and bare issue numbers.
    #[serde(default)]
    pub key: String,
}

/// A custom field declaration: maps the name used on the command line to
/// Jira's field id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldConfig {
    /// Jira field id, e.g. `customfield_10010`.
    pub key: String,

    /// How plain-text values are encoded.
    #[serde(default)]
    pub schema: FieldSchema,
}

/// Issue section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueConfig {
    /// Default issue type for `create` when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_type: Option<String>,

    /// Custom fields by command-line name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, CustomFieldConfig>,
}

/// TeamCity section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamCityConfig {
    /// Base URL of the TeamCity server.
    #[serde(default)]
    pub url: String,
}

/// The full configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL of the Jira server.
    #[serde(default)]
    pub server: String,

    /// Login (user name or e-mail).
    #[serde(default)]
    pub login: String,

    #[serde(default)]
    pub auth_type: AuthType,

    #[serde(default)]
    pub project: ProjectConfig,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub issue: IssueConfig,

    #[serde(default)]
    pub teamcity: TeamCityConfig,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            login: String::new(),
            auth_type: AuthType::default(),
            project: ProjectConfig::default(),
            timeout_secs: default_timeout_secs(),
            issue: IssueConfig::default(),
            teamcity: TeamCityConfig::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl JiraConfig {
    /// Returns the server URL without a trailing slash, or an error if unset.
    pub fn server_url(&self) -> Result<String> {
        let server = self.server.trim().trim_end_matches('/');
        if server.is_empty() {
            return Err(ConfigError::Missing {
                key: "server".into(),
                hint: "the config file or JIRA_SERVER".into(),
            });
        }
        Ok(server.to_string())
    }

    /// Returns the TeamCity URL without a trailing slash, or an error if unset.
    pub fn teamcity_url(&self) -> Result<String> {
        let url = self.teamcity.url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ConfigError::Missing {
                key: "teamcity.url".into(),
                hint: "the config file or JIRA_TEAMCITY__URL".into(),
            });
        }
        Ok(url.to_string())
    }

    /// Looks up a custom field declaration by its command-line name.
    pub fn custom_field(&self, name: &str) -> Option<&CustomFieldConfig> {
        self.issue.custom_fields.get(name)
    }
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Build the layered configuration sources.
///
/// Nested keys use `__` in environment variables (`JIRA_PROJECT__KEY`).
/// Token variables are excluded; see [`crate::secrets`].
pub fn figment(config_path: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(JiraConfig::default()));
    if let Some(path) = config_path {
        figment = figment.merge(Yaml::file(path));
    }
    figment.merge(
        Env::prefixed(ENV_PREFIX)
            .ignore(&["api_token", "config_file"])
            .split("__"),
    )
}

/// Load configuration from defaults, `config_path` (if it exists) and the
/// environment.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] if the file contains invalid YAML or a
/// value has the wrong type.
pub fn load_config(config_path: Option<&Path>) -> Result<JiraConfig> {
    let config = figment(config_path).extract()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
