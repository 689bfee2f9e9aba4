//! Issue model: what Jira returns for an issue, and the payloads used to
//! create and edit one.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::user::User;

/// An object Jira identifies by name (issue type, priority, status, component...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub name: String,
}

impl Named {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An issue as returned by `GET /rest/api/2/issue/{key}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub id: String,

    pub key: String,

    #[serde(default)]
    pub fields: IssueFields,
}

/// The subset of issue fields the tool reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, rename = "issuetype")]
    pub issue_type: Named,

    #[serde(default)]
    pub priority: Option<Named>,

    #[serde(default)]
    pub status: Option<Named>,

    #[serde(default)]
    pub assignee: Option<User>,

    #[serde(default)]
    pub reporter: Option<User>,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub components: Vec<Named>,

    #[serde(default, rename = "fixVersions")]
    pub fix_versions: Vec<Named>,

    #[serde(default)]
    pub created: Option<String>,

    #[serde(default)]
    pub updated: Option<String>,
}

/// Jira's timestamp format, e.g. `2024-03-01T09:30:00.000+0000`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

impl IssueFields {
    /// Parsed creation time, if present and well formed.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.created.as_deref()?)
    }

    /// Parsed last-update time, if present and well formed.
    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.updated.as_deref()?)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    /// The status the transition leads to.
    #[serde(default)]
    pub to: Option<Named>,
}

impl Transition {
    /// Whether `state` names this transition or its target status.
    pub fn matches(&self, state: &str) -> bool {
        self.name.eq_ignore_ascii_case(state)
            || self
                .to
                .as_ref()
                .is_some_and(|to| to.name.eq_ignore_ascii_case(state))
    }
}

/// The key Jira hands back after creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    #[serde(default)]
    pub id: String,
    pub key: String,
}

/// Everything needed to create an issue.
///
/// Custom fields are carried as already-converted `(field id, value)` pairs.
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub project: String,
    pub issue_type: String,
    pub summary: String,
    pub body: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
    pub parent: Option<String>,
    pub labels: Vec<String>,
    pub components: Vec<String>,
    pub fix_versions: Vec<String>,
    pub custom: Vec<(String, Value)>,
}

impl NewIssue {
    /// Builds the `POST /rest/api/2/issue` request body.
    pub fn to_request(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("project".into(), json!({ "key": self.project }));
        fields.insert("issuetype".into(), json!({ "name": self.issue_type }));
        fields.insert("summary".into(), json!(self.summary));
        if let Some(ref body) = self.body {
            fields.insert("description".into(), json!(body));
        }
        if let Some(ref priority) = self.priority {
            fields.insert("priority".into(), json!({ "name": priority }));
        }
        if let Some(ref assignee) = self.assignee {
            fields.insert("assignee".into(), json!({ "name": assignee }));
        }
        if let Some(ref reporter) = self.reporter {
            fields.insert("reporter".into(), json!({ "name": reporter }));
        }
        if let Some(ref parent) = self.parent {
            fields.insert("parent".into(), json!({ "key": parent }));
        }
        if !self.labels.is_empty() {
            fields.insert("labels".into(), json!(self.labels));
        }
        if !self.components.is_empty() {
            fields.insert("components".into(), named_list(&self.components));
        }
        if !self.fix_versions.is_empty() {
            fields.insert("fixVersions".into(), named_list(&self.fix_versions));
        }
        for (id, value) in &self.custom {
            fields.insert(id.clone(), value.clone());
        }
        json!({ "fields": fields })
    }

    /// Seeds a new issue from an existing one, as `clone` does.
    pub fn from_existing(project: &str, issue: &Issue) -> Self {
        let fields = &issue.fields;
        Self {
            project: project.to_string(),
            issue_type: fields.issue_type.name.clone(),
            summary: fields.summary.clone(),
            body: fields.description.clone(),
            priority: fields.priority.as_ref().map(|p| p.name.clone()),
            assignee: fields
                .assignee
                .as_ref()
                .map(|u| u.assignable_id().to_string()),
            reporter: None,
            parent: None,
            labels: fields.labels.clone(),
            components: fields.components.iter().map(|c| c.name.clone()).collect(),
            fix_versions: fields.fix_versions.iter().map(|v| v.name.clone()).collect(),
            custom: Vec::new(),
        }
    }
}

/// A partial update of an existing issue.
///
/// `None` fields are left untouched. Labels and components prefixed with
/// `-` are removed, everything else is added.
#[derive(Debug, Clone, Default)]
pub struct IssueEdit {
    pub summary: Option<String>,
    pub body: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub labels: Vec<String>,
    pub components: Vec<String>,
    pub custom: Vec<(String, Value)>,
}

impl IssueEdit {
    /// Returns `true` if applying this edit would change nothing.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.body.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.labels.is_empty()
            && self.components.is_empty()
            && self.custom.is_empty()
    }

    /// Builds the `PUT /rest/api/2/issue/{key}` request body.
    pub fn to_request(&self) -> Value {
        let mut fields = Map::new();
        if let Some(ref summary) = self.summary {
            fields.insert("summary".into(), json!(summary));
        }
        if let Some(ref body) = self.body {
            fields.insert("description".into(), json!(body));
        }
        if let Some(ref priority) = self.priority {
            fields.insert("priority".into(), json!({ "name": priority }));
        }
        if let Some(ref assignee) = self.assignee {
            fields.insert("assignee".into(), json!({ "name": assignee }));
        }
        for (id, value) in &self.custom {
            fields.insert(id.clone(), value.clone());
        }

        let mut update = Map::new();
        if !self.labels.is_empty() {
            let ops: Vec<Value> = self.labels.iter().map(|l| add_or_remove(l, false)).collect();
            update.insert("labels".into(), Value::Array(ops));
        }
        if !self.components.is_empty() {
            let ops: Vec<Value> = self
                .components
                .iter()
                .map(|c| add_or_remove(c, true))
                .collect();
            update.insert("components".into(), Value::Array(ops));
        }

        let mut body = Map::new();
        if !fields.is_empty() {
            body.insert("fields".into(), Value::Object(fields));
        }
        if !update.is_empty() {
            body.insert("update".into(), Value::Object(update));
        }
        Value::Object(body)
    }
}

fn named_list(names: &[String]) -> Value {
    Value::Array(names.iter().map(|n| json!({ "name": n })).collect())
}

fn add_or_remove(item: &str, named: bool) -> Value {
    let (op, value) = match item.strip_prefix('-') {
        Some(rest) => ("remove", rest),
        None => ("add", item),
    };
    if named {
        json!({ op: { "name": value } })
    } else {
        json!({ op: value })
    }
}
