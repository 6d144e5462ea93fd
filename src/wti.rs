//! Client for the WebTranslateIt project API.
//!
//! Only two read-only endpoints are used:
//! - `GET <api>/projects/<token>.json` for the list of project files
//! - `GET <api>/projects/<token>/zip_file` for the archive of all files
//!
//! The project token is part of both URLs, so URLs are only ever logged
//! through [`WtiClient::redact`].

use crate::error::FetchError;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://webtranslateit.com/api";

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    project: Project,
}

/// Project metadata
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub project_files: Vec<ProjectFile>,
}

/// One file descriptor of a project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    pub locale_code: String,
    #[serde(deserialize_with = "string_or_number")]
    pub hash_file: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Parse the body of the project metadata endpoint
pub fn parse_project(body: &str) -> Result<Project, FetchError> {
    let response: ProjectResponse = serde_json::from_str(body)?;
    Ok(response.project)
}

pub struct WtiClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl WtiClient {
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn project_url(&self) -> String {
        format!("{}/projects/{}.json", self.api_url, self.token)
    }

    pub fn zip_url(&self) -> String {
        format!("{}/projects/{}/zip_file", self.api_url, self.token)
    }

    /// Replace the project token in `url` so it can be logged
    pub fn redact(&self, url: &str) -> String {
        if self.token.is_empty() {
            return url.to_string();
        }
        url.replace(&self.token, "***")
    }

    /// Fetch the project metadata
    pub async fn fetch_project(&self) -> Result<Project, FetchError> {
        let url = self.project_url();
        info!("Fetching project metadata from {}", self.redact(&url));

        let body = self
            .get(&url)
            .await?
            .text()
            .await
            .map_err(|e| self.http_error(&url, e))?;
        let project = parse_project(&body)?;

        debug!("Project lists {} files", project.project_files.len());
        Ok(project)
    }

    /// Download the zip archive of all project files
    pub async fn fetch_zip(&self) -> Result<Vec<u8>, FetchError> {
        let url = self.zip_url();
        info!("Downloading translation archive from {}", self.redact(&url));

        let bytes = self
            .get(&url)
            .await?
            .bytes()
            .await
            .map_err(|e| self.http_error(&url, e))?;

        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.http_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.redact(url),
                status,
            });
        }

        Ok(response)
    }

    fn http_error(&self, url: &str, source: reqwest::Error) -> FetchError {
        FetchError::Http {
            url: self.redact(url),
            source: source.without_url(),
        }
    }
}
