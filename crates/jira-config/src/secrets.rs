//! API tokens. These are read from the environment only and never written
//! to the config file.

use crate::config::{ConfigError, Result};

/// Jira API token (or personal access token for bearer auth).
pub const JIRA_TOKEN_ENV: &str = "JIRA_API_TOKEN";

/// TeamCity access token.
pub const TEAMCITY_TOKEN_ENV: &str = "TEAMCITY_API_TOKEN";

/// Read the Jira API token.
pub fn jira_token() -> Result<String> {
    token(JIRA_TOKEN_ENV)
}

/// Read the TeamCity access token.
pub fn teamcity_token() -> Result<String> {
    token(TEAMCITY_TOKEN_ENV)
}

fn token(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing {
            key: var.to_lowercase(),
            hint: format!("the {} environment variable", var),
        }),
    }
}
