//! TeamCity build artifact lookup.
//!
//! Artifacts form a tree under `/app/rest/builds/id:<id>/artifacts`. Each
//! listing returns the entries of one directory; entry hrefs point at the
//! metadata endpoint and the part after the metadata prefix is the entry's
//! path inside the build.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Deserialize;
use ureq::Agent;

use crate::client::{check, read_json};
use crate::error::{ApiError, Result};

/// Upper bound on a downloaded artifact.
const MAX_ARTIFACT_BYTES: u64 = 512 * 1024 * 1024;

#[derive(Debug, Default, Deserialize)]
struct Listing {
    #[serde(default, rename = "file")]
    files: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    name: String,
    #[serde(default)]
    href: String,
}

/// A blocking TeamCity REST client authenticated with an access token.
#[derive(Debug, Clone)]
pub struct TeamCityClient {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl TeamCityClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: format!("Bearer {token}"),
        }
    }

    fn artifacts_url(&self, build: u64) -> String {
        format!("{}/app/rest/builds/id:{build}/artifacts", self.base_url)
    }

    /// Find the path of the first artifact named `filename`, searching the
    /// artifact tree breadth first.
    ///
    /// A missing root listing means the build has no artifacts; a missing
    /// directory below the root is skipped.
    pub fn find_artifact(&self, build: u64, filename: &str) -> Result<String> {
        let metadata_prefix = format!("/app/rest/builds/id:{build}/artifacts/metadata/");
        let mut queue = VecDeque::from([String::new()]);

        while let Some(parent) = queue.pop_front() {
            let mut url = self.artifacts_url(build);
            if !parent.is_empty() {
                url.push_str("/children/");
                url.push_str(&parent);
            }
            tracing::debug!(%url, "listing artifacts");

            let response = self
                .agent
                .get(&url)
                .header("Authorization", &self.authorization)
                .header("Accept", "application/json")
                .call()?;
            let listing: Listing = match check(response) {
                Ok(response) => read_json(response)?,
                Err(err) if err.is_not_found() && parent.is_empty() => {
                    return Err(ApiError::NoArtifacts);
                }
                Err(err) if err.is_not_found() => {
                    tracing::debug!(%parent, "artifact directory vanished, skipping");
                    continue;
                }
                Err(err) => return Err(err),
            };

            for entry in listing.files {
                let path = entry
                    .href
                    .strip_prefix(&metadata_prefix)
                    .map(str::to_string)
                    .unwrap_or_else(|| join(&parent, &entry.name));
                if entry.name == filename {
                    return Ok(path);
                }
                queue.push_back(path);
            }
        }

        Err(ApiError::NoSuchArtifact {
            build: build.to_string(),
            filename: filename.to_string(),
        })
    }

    /// Download the artifact at `path`.
    pub fn download_artifact(&self, build: u64, path: &str) -> Result<Vec<u8>> {
        let url = format!("{}/content/{path}", self.artifacts_url(build));
        tracing::debug!(%url, "downloading artifact");
        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.authorization)
            .call()?;
        let mut response = check(response)?;
        let data = response
            .body_mut()
            .with_config()
            .limit(MAX_ARTIFACT_BYTES)
            .read_to_vec()?;
        Ok(data)
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
