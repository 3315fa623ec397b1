//! Error types for the GitHub event source.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the GitHub API client.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Access token cannot be used as a header value
    #[error("invalid access token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    /// GitHub answered with a non-success status
    #[error("GitHub API error: {status} - {message}")]
    Api { status: StatusCode, message: String },
}

impl GitHubError {
    /// Whether GitHub reported that the target does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Errors returned by the feed lifecycle operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Trigger resource is not of the form `owner/repo`
    #[error("invalid resource {0:?}: expected owner/repo")]
    InvalidResource(String),

    /// GitHub API call failed
    #[error(transparent)]
    GitHub(#[from] GitHubError),
}
