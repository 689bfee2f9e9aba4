//! Discovery of the configuration file.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_FILE_ENV: &str = "JIRA_CONFIG_FILE";

const CONFIG_DIR_NAME: &str = ".jira";
const CONFIG_FILE_NAME: &str = ".config.yml";

/// Resolve the config file path.
///
/// Priority: explicit path > `JIRA_CONFIG_FILE` > `$XDG_CONFIG_HOME/.jira/.config.yml`
/// > `~/.config/.jira/.config.yml`. Returns `None` only when no home
/// directory can be determined.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    config_home().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn config_home() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg));
        }
    }
    home_dir().map(|home| home.join(".config"))
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
