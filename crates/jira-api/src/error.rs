//! API error types.

use serde::Deserialize;

/// Errors that can occur while talking to Jira or TeamCity.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or its response could not be read.
    #[error("request failed")]
    Transport(#[from] ureq::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error messages extracted from the response body.
        body: String,
    },

    /// A response body did not have the expected shape.
    #[error("unexpected response")]
    Decode(#[from] serde_json::Error),

    /// A local file could not be read or written.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// The build exists but published no artifacts.
    #[error("build has no artifacts")]
    NoArtifacts,

    /// The artifact tree was searched without finding the file.
    #[error("artifact {filename} not found in build {build}")]
    NoSuchArtifact {
        build: String,
        filename: String,
    },
}

impl ApiError {
    /// Build a [`ApiError::Status`] from a status code and raw response body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: error_message(body),
        }
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// A specialized `Result` type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Jira's error body: `{"errorMessages": [...], "errors": {"field": "msg"}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: std::collections::BTreeMap<String, String>,
}

/// Extract the human-readable messages from a Jira error body.
///
/// Falls back to the trimmed body when it is not Jira's error JSON.
pub fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
    let mut messages = parsed.error_messages;
    messages.extend(
        parsed
            .errors
            .into_iter()
            .map(|(field, msg)| format!("{field}: {msg}")),
    );
    if messages.is_empty() {
        let body = body.trim();
        if body.is_empty() {
            return "no details".to_string();
        }
        return body.to_string();
    }
    messages.join("; ")
}
