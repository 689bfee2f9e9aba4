//! End-to-end CLI tests for the `jira` binary.
//!
//! Nothing here talks to a server: every run points `JIRA_CONFIG_FILE` at a
//! config inside a temp directory and only exercises offline paths (help,
//! version, script dry runs and script errors).

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A temp directory holding the config file and scripts of one test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.yml"),
            "server: https://jira.example.com\nlogin: tester\nproject:\n  key: PROJ\n",
        )
        .unwrap();
        Self { dir }
    }

    fn script(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn jira(&self) -> Command {
        let mut cmd = Command::cargo_bin("jira").unwrap();
        cmd.env("JIRA_CONFIG_FILE", self.config())
            .env_remove("JIRA_API_TOKEN")
            .env_remove("JIRA_LOGIN");
        cmd
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.yml")
    }
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

const CREATE_AND_COMMENT: &str = r#"
define:
  name: "~1"
  kind: Task
actions:
  - action: create
    type: $kind
    summary: "Build $name"
    label: [scripted, "$name"]
  - action: comment
    args: [add, $issue_key, "Created for $name"]
"#;

// ---------------------------------------------------------------------------
// Top-level commands
// ---------------------------------------------------------------------------

#[test]
fn help_lists_issue_commands() {
    let sandbox = Sandbox::new();
    sandbox
        .jira()
        .args(["issue", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("script"))
        .stdout(predicate::str::contains("create"));
}

#[test]
fn version_prints_package_version() {
    let sandbox = Sandbox::new();
    sandbox
        .jira()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "jira {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn version_json_is_parseable() {
    let sandbox = Sandbox::new();
    let output = sandbox.jira().args(["version", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["server"], "https://jira.example.com");
}

// ---------------------------------------------------------------------------
// Script dry runs
// ---------------------------------------------------------------------------

#[test]
fn dry_run_prints_translated_commands() {
    let sandbox = Sandbox::new();
    let script = sandbox.script("release.yml", CREATE_AND_COMMENT);
    sandbox
        .jira()
        .args(["issue", "script", "--dry-run", "--no-input", path_arg(&script), "widget"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "jira issue create --no-input --label scripted --label widget --summary \"Build widget\" --type Task",
        ))
        .stdout(predicate::str::contains(
            "jira issue comment add <issue_key> \"Created for widget\"",
        ));
}

#[test]
fn dry_run_json_reports_variables_and_commands() {
    let sandbox = Sandbox::new();
    let script = sandbox.script("release.yml", CREATE_AND_COMMENT);
    let output = sandbox
        .jira()
        .args(["--json", "issue", "script", "--dry-run", path_arg(&script), "widget"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "dry run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["variables"]["name"], "widget");
    assert_eq!(json["variables"]["issue_key"], "<issue_key>");
    assert_eq!(json["commands"].as_array().unwrap().len(), 2);
    assert_eq!(json["commands"][1][0], "comment");
}

// ---------------------------------------------------------------------------
// Script errors
// ---------------------------------------------------------------------------

#[test]
fn missing_positional_argument_fails() {
    let sandbox = Sandbox::new();
    let script = sandbox.script("release.yml", CREATE_AND_COMMENT);
    sandbox
        .jira()
        .args(["issue", "script", "--dry-run", path_arg(&script)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing command line argument 1: name"));
}

#[test]
fn undefined_variable_fails() {
    let sandbox = Sandbox::new();
    let script = sandbox.script(
        "typo.yml",
        "actions:\n  - action: comment\n    args: [add, PROJ-1, $nope]\n",
    );
    sandbox
        .jira()
        .args(["issue", "script", "--dry-run", path_arg(&script)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown variable nope in script"));
}

#[test]
fn unknown_action_fails() {
    let sandbox = Sandbox::new();
    let script = sandbox.script("bad.yml", "actions:\n  - action: explode\n");
    sandbox
        .jira()
        .args(["issue", "script", "--dry-run", path_arg(&script)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown action 'explode'"));
}

#[test]
fn missing_script_file_fails() {
    let sandbox = Sandbox::new();
    let missing = sandbox.dir.path().join("nope.yml");
    sandbox
        .jira()
        .args(["issue", "script", path_arg(&missing)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read script"));
}

#[test]
fn unparseable_script_fails() {
    let sandbox = Sandbox::new();
    let script = sandbox.script("broken.yml", "actions: [unclosed\n");
    sandbox
        .jira()
        .args(["issue", "script", "--dry-run", path_arg(&script)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to parse script"));
}
