//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds all the state a command handler needs: the
//! loaded configuration, the effective project, global flags and the
//! issue-tracker connection, which is opened on first use.

use std::cell::OnceCell;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use jira_api::{Auth, IssueTracker, JiraClient, TeamCityClient};
use jira_config::config::{AuthType, ConfigError, JiraConfig, load_config};
use jira_config::{paths, secrets};
use jira_core::key;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
/// Script actions reuse the context of the `script` command that runs them.
pub struct RuntimeContext {
    /// Loaded configuration.
    pub config: JiraConfig,

    /// Config file in use, if any was found.
    pub config_path: Option<PathBuf>,

    /// Effective project key (`--project` or `project.key`); may be empty.
    pub project: String,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,

    tracker: OnceCell<Box<dyn IssueTracker>>,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let config_path = paths::config_path(global.config.as_deref());
        tracing::debug!(path = ?config_path, "loading config");
        let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
            Some(path) => format!("failed to load config from {}", path.display()),
            None => "failed to load config".to_string(),
        })?;

        let project = global
            .project
            .clone()
            .unwrap_or_else(|| config.project.key.clone());

        Ok(Self {
            config,
            config_path,
            project,
            json: global.json,
            verbose: global.verbose || global.debug,
            quiet: global.quiet,
            tracker: OnceCell::new(),
        })
    }

    /// The issue tracker, connecting on first use.
    pub fn tracker(&self) -> Result<&dyn IssueTracker> {
        if let Some(tracker) = self.tracker.get() {
            return Ok(tracker.as_ref());
        }
        let client = self.connect()?;
        let tracker = self
            .tracker
            .get_or_init(|| Box::new(client) as Box<dyn IssueTracker>);
        Ok(tracker.as_ref())
    }

    fn connect(&self) -> Result<JiraClient> {
        let server = self.config.server_url()?;
        let token = secrets::jira_token()?;
        let auth = match self.config.auth_type {
            AuthType::Basic => {
                if self.config.login.trim().is_empty() {
                    return Err(ConfigError::Missing {
                        key: "login".into(),
                        hint: "the config file or JIRA_LOGIN".into(),
                    }
                    .into());
                }
                Auth::Basic {
                    login: self.config.login.clone(),
                    token,
                }
            }
            AuthType::Bearer => Auth::Bearer { token },
        };
        tracing::debug!(%server, ?auth, "connecting to jira");
        Ok(JiraClient::new(&server, &auth, self.timeout()))
    }

    /// A TeamCity client for the configured server.
    pub fn teamcity(&self) -> Result<TeamCityClient> {
        let url = self.config.teamcity_url()?;
        let token = secrets::teamcity_token()?;
        Ok(TeamCityClient::new(&url, &token, self.timeout()))
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// The project key, or an error if none is configured.
    pub fn require_project(&self) -> Result<&str> {
        if self.project.is_empty() {
            bail!("no project given; pass --project or set project.key in the config");
        }
        Ok(&self.project)
    }

    /// Normalise a user-supplied issue reference (`42` -> `PROJ-42`).
    pub fn issue_key(&self, input: &str) -> String {
        key::issue_key(&self.project, input)
    }

    /// Whether a command may prompt for missing values.
    pub fn can_prompt(&self, no_input: bool) -> bool {
        !no_input && jira_ui::terminal::is_interactive()
    }

    /// Browser URL of an issue, when the server is known.
    pub fn browse_url(&self, key: &str) -> Option<String> {
        self.config
            .server_url()
            .ok()
            .map(|server| format!("{server}/browse/{key}"))
    }

    /// A context with a preset tracker and project `PROJ`.
    #[cfg(test)]
    pub fn with_tracker(tracker: impl IssueTracker + 'static) -> Self {
        let ctx = Self {
            config: JiraConfig::default(),
            config_path: None,
            project: "PROJ".to_string(),
            json: false,
            verbose: false,
            quiet: true,
            tracker: OnceCell::new(),
        };
        let _ = ctx.tracker.set(Box::new(tracker));
        ctx
    }
}
