//! GitHub contents adapter.
//!
//! Creates a file with `PUT /repos/{owner}/{repo}/contents/{path}`. The
//! request carries no `sha`, so an existing file at the same path is a
//! conflict rather than an overwrite.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{PublishReceipt, PublishedAddress, StoreConfig};
use crate::error::PublishError;
use crate::ports::{ContentStore, CreateObjectRequest};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Request body for "create or update file contents"
#[derive(Debug, Serialize)]
struct CreateContentBody<'a> {
    message: &'a str,
    content: &'a str,
    branch: &'a str,
}

/// Success body; only the fields the publisher needs
#[derive(Debug, Deserialize)]
struct CreateContentResponse {
    #[serde(default)]
    content: Option<ContentInfo>,
    #[serde(default)]
    commit: Option<CommitInfo>,
}

#[derive(Debug, Deserialize)]
struct ContentInfo {
    path: String,
    #[serde(default)]
    sha: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    #[serde(default)]
    sha: Option<String>,
}

/// Error body, e.g. `{"message": "Bad credentials", "documentation_url": "..."}`
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    #[serde(default)]
    message: String,
}

/// Content store backed by a GitHub repository.
pub struct GitHubContentStore {
    client: Client,
    config: StoreConfig,
}

impl GitHubContentStore {
    /// Create a new adapter.
    ///
    /// No timeout is set unless the configuration asks for one.
    pub fn new(config: StoreConfig) -> Result<Self, PublishError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(PublishError::Transport)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// `{api_base_url}/repos/{owner}/{repo}/contents/{path}`
    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            path.trim_start_matches('/'),
        )
    }
}

#[async_trait]
impl ContentStore for GitHubContentStore {
    async fn create_object(&self, request: CreateObjectRequest) -> Result<PublishReceipt, PublishError> {
        let url = self.contents_url(&request.path);
        let body = CreateContentBody {
            message: &request.message,
            content: &request.content_base64,
            branch: &self.config.branch,
        };

        let mut http_request = self.client.put(&url).json(&body);
        match &self.config.auth_token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
                    .map_err(|_| PublishError::Unauthorized {
                        message: "access token contains invalid header characters".to_string(),
                    })?;
                value.set_sensitive(true);
                http_request = http_request.header(AUTHORIZATION, value);
            }
            None => warn!(store = %self.config.target(), "No access token configured; request is unauthenticated"),
        }

        debug!(url = %url, branch = %self.config.branch, "PUT contents");

        let response = http_request.send().await.map_err(|e| {
            if e.is_connect() {
                PublishError::Connection(format!("Cannot connect to {}", self.config.api_base_url))
            } else {
                PublishError::Transport(e)
            }
        })?;

        let status = response.status();
        let rate_limit_exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, rate_limit_exhausted, &text));
        }

        let parsed: CreateContentResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Parse(e.to_string()))?;

        into_receipt(parsed, &request.path)
    }
}

/// Map a non-success response to a `PublishError`.
fn classify_failure(status: StatusCode, rate_limit_exhausted: bool, body: &str) -> PublishError {
    let message = serde_json::from_str::<GitHubErrorBody>(body)
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    match status {
        StatusCode::UNAUTHORIZED => PublishError::Unauthorized { message },
        StatusCode::TOO_MANY_REQUESTS => PublishError::RateLimited { message },
        StatusCode::FORBIDDEN if rate_limit_exhausted => PublishError::RateLimited { message },
        StatusCode::FORBIDDEN => PublishError::Forbidden { message },
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => PublishError::Conflict { message },
        _ => PublishError::Rejected { status, message },
    }
}

fn into_receipt(response: CreateContentResponse, requested_path: &str) -> Result<PublishReceipt, PublishError> {
    let content = response.content.ok_or_else(|| PublishError::MissingDownloadUrl {
        path: requested_path.to_string(),
    })?;

    let address = content
        .download_url
        .and_then(PublishedAddress::new)
        .ok_or_else(|| PublishError::MissingDownloadUrl {
            path: content.path.clone(),
        })?;

    Ok(PublishReceipt {
        address,
        path: content.path,
        content_sha: content.sha,
        commit_sha: response.commit.and_then(|c| c.sha),
    })
}
