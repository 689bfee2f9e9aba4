//! Jira REST (v2) client.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jira_core::issue::{CreatedIssue, Issue, IssueEdit, NewIssue, Transition};
use jira_core::user::{Me, User};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::error::{ApiError, Result};
use crate::traits::{Assignee, IssueTracker};

const API_PREFIX: &str = "/rest/api/2";

/// Page size for user searches.
const MAX_USER_RESULTS: &str = "100";

/// Boundary for attachment uploads.
const MULTIPART_BOUNDARY: &str = "----jira-cli-attachment-9f3c2e71";

/// How requests authenticate.
#[derive(Clone)]
pub enum Auth {
    /// Login and API token, sent as HTTP basic auth.
    Basic { login: String, token: String },
    /// Personal access token.
    Bearer { token: String },
}

impl Auth {
    fn header(&self) -> String {
        match self {
            Self::Basic { login, token } => {
                format!("Basic {}", STANDARD.encode(format!("{login}:{token}")))
            }
            Self::Bearer { token } => format!("Bearer {token}"),
        }
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { login, .. } => f
                .debug_struct("Basic")
                .field("login", login)
                .finish_non_exhaustive(),
            Self::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
        }
    }
}

/// A blocking Jira REST client.
#[derive(Debug, Clone)]
pub struct JiraClient {
    agent: Agent,
    base_url: String,
    authorization: String,
}

#[derive(Deserialize)]
struct TransitionList {
    #[serde(default)]
    transitions: Vec<Transition>,
}

impl JiraClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str, auth: &Auth, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: auth.header(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        tracing::debug!(path, "GET");
        let mut request = self
            .agent
            .get(&self.url(path))
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json");
        for (name, value) in query {
            request = request.query(*name, *value);
        }
        let response = check(request.call()?)?;
        read_json(response)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Response<Body>> {
        tracing::debug!(path, "POST");
        let response = self
            .agent
            .post(&self.url(path))
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .send_json(body)?;
        check(response)
    }

    fn put(&self, path: &str, body: &Value) -> Result<()> {
        tracing::debug!(path, "PUT");
        let response = self
            .agent
            .put(&self.url(path))
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .send_json(body)?;
        check(response)?;
        Ok(())
    }
}

impl IssueTracker for JiraClient {
    fn me(&self) -> Result<Me> {
        self.get("/myself", &[])
    }

    fn assignable_users(&self, project: &str, query: Option<&str>) -> Result<Vec<User>> {
        let mut params = vec![("project", project), ("maxResults", MAX_USER_RESULTS)];
        if let Some(query) = query {
            params.push(("username", query));
        }
        self.get("/user/assignable/search", &params)
    }

    fn get_issue(&self, key: &str) -> Result<Issue> {
        self.get(&format!("/issue/{key}"), &[])
    }

    fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        let response = self.post("/issue", &issue.to_request())?;
        let created: CreatedIssue = read_json(response)?;
        tracing::info!(key = %created.key, "issue created");
        Ok(created)
    }

    fn edit_issue(&self, key: &str, edit: &IssueEdit) -> Result<()> {
        self.put(&format!("/issue/{key}"), &edit.to_request())
    }

    fn assign(&self, key: &str, assignee: Assignee<'_>) -> Result<()> {
        let name = match assignee {
            Assignee::Nobody => Value::Null,
            // Jira's marker for the project default assignee.
            Assignee::Default => json!("-1"),
            Assignee::User(user) => json!(user),
        };
        self.put(&format!("/issue/{key}/assignee"), &json!({ "name": name }))
    }

    fn add_comment(&self, key: &str, body: &str) -> Result<()> {
        self.post(&format!("/issue/{key}/comment"), &json!({ "body": body }))?;
        Ok(())
    }

    fn link(&self, inward: &str, outward: &str, link_type: &str) -> Result<()> {
        let body = json!({
            "type": { "name": link_type },
            "inwardIssue": { "key": inward },
            "outwardIssue": { "key": outward },
        });
        self.post("/issueLink", &body)?;
        Ok(())
    }

    fn transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let list: TransitionList = self.get(&format!("/issue/{key}/transitions"), &[])?;
        Ok(list.transitions)
    }

    fn transition(&self, key: &str, transition_id: &str) -> Result<()> {
        let body = json!({ "transition": { "id": transition_id } });
        self.post(&format!("/issue/{key}/transitions"), &body)?;
        Ok(())
    }

    fn attach(&self, key: &str, filename: &str, data: &[u8]) -> Result<()> {
        let path = format!("/issue/{key}/attachments");
        tracing::debug!(path, filename, bytes = data.len(), "POST multipart");
        let response = self
            .agent
            .post(&self.url(&path))
            .header("Authorization", &self.authorization)
            .header("X-Atlassian-Token", "no-check")
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .send(&multipart_body(filename, data)[..])?;
        check(response)?;
        Ok(())
    }
}

/// Turn a non-success response into [`ApiError::Status`].
pub(crate) fn check(mut response: Response<Body>) -> Result<Response<Body>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Err(ApiError::status(status.as_u16(), &body))
}

pub(crate) fn read_json<T: DeserializeOwned>(mut response: Response<Body>) -> Result<T> {
    let text = response.body_mut().read_to_string()?;
    Ok(serde_json::from_str(&text)?)
}

/// A single-part `multipart/form-data` body with the file under `file`.
fn multipart_body(filename: &str, data: &[u8]) -> Vec<u8> {
    let filename = filename.replace('"', "%22");
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}
