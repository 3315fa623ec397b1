//! GitHub API client for repository webhook management.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Response;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::GitHubError;
use crate::hook::{Hook, HookSpec};

/// Public GitHub REST endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub API client authenticated with a static bearer token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
}

/// Error body returned by the GitHub REST API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GitHubClient {
    /// Create a new GitHub client for `api_url` using `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client cannot be created.
    pub fn new(token: &str, api_url: &str) -> Result<Self, GitHubError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("github-source/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a webhook on a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or GitHub rejects it.
    #[instrument(skip(self, spec), fields(events = ?spec.events))]
    pub async fn create_hook(
        &self,
        owner: &str,
        repo: &str,
        spec: &HookSpec,
    ) -> Result<Hook, GitHubError> {
        let url = format!("{}/repos/{owner}/{repo}/hooks", self.api_url);

        let response = self.client.post(&url).json(spec).send().await?;
        let response = check_status(response).await?;

        let hook: Hook = response.json().await?;
        debug!(hook_id = hook.id, "Created webhook");
        Ok(hook)
    }

    /// Delete a webhook from a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or GitHub rejects it, including
    /// when the hook does not exist (see [`GitHubError::is_not_found`]).
    #[instrument(skip(self))]
    pub async fn delete_hook(&self, owner: &str, repo: &str, id: i64) -> Result<(), GitHubError> {
        let url = format!("{}/repos/{owner}/{repo}/hooks/{id}", self.api_url);

        let response = self.client.delete(&url).send().await?;
        check_status(response).await?;

        debug!("Deleted webhook");
        Ok(())
    }
}

/// Turn a non-success response into [`GitHubError::Api`].
async fn check_status(response: Response) -> Result<Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) if !body.is_empty() => body,
        Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
    };

    Err(GitHubError::Api { status, message })
}
