//! Load scripts from YAML.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::value::Value;

/// A parsed script: variable definitions plus the actions to run, in order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    /// Variable name -> literal value or `~` directive.
    #[serde(default)]
    pub define: BTreeMap<String, String>,

    /// Actions in execution order. Each should be a mapping with an
    /// `action` property; this is checked when the action runs.
    #[serde(default)]
    pub actions: Vec<Value>,
}

impl Script {
    /// Parse a script from a YAML string.
    ///
    /// An empty document is a valid, empty script.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let script = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            variables = script.define.len(),
            actions = script.actions.len(),
            "loaded script"
        );
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptError;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const DEFECT: &str = r#"
define:
  summary: "~1"
  owner: "~choose_user"
actions:
  - action: create
    type: Bug
    summary: "Crash in $summary"
    assignee: $owner
  - action: comment
    args: [add, $issue_key, "Created by script"]
"#;

    #[test]
    fn parse_define_and_actions() {
        let script = Script::parse(DEFECT).unwrap();
        assert_eq!(script.define["summary"], "~1");
        assert_eq!(script.define["owner"], "~choose_user");
        assert_eq!(script.actions.len(), 2);

        let first = script.actions[0].as_mapping().unwrap();
        assert_eq!(first["action"], Value::scalar("create"));
        assert_eq!(first["summary"], Value::scalar("Crash in $summary"));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let script = Script::parse("actions: []\n").unwrap();
        assert!(script.define.is_empty());
        assert!(script.actions.is_empty());

        let empty = Script::parse("  \n").unwrap();
        assert!(empty.actions.is_empty());
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Script::parse("define: [unclosed\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn define_must_be_a_mapping() {
        let err = Script::parse("define: [a, b]\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DEFECT.as_bytes()).unwrap();
        let script = Script::load(file.path()).unwrap();
        assert_eq!(script.actions.len(), 2);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Script::load(Path::new("/nonexistent/script.yml")).unwrap_err();
        assert!(matches!(err, ScriptError::Io(_)));
    }
}
