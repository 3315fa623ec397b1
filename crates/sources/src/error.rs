//! Error types for the event source run-loop.

use std::fmt;
use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Feed lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Start,
    Stop,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start feed"),
            Self::Stop => f.write_str("stop feed"),
        }
    }
}

/// Errors surfaced by the run-loop.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Request body did not match the source's trigger or context types
    #[error("invalid {operation} request: {source}")]
    InvalidRequest {
        operation: Operation,
        source: serde_json::Error,
    },

    /// The event source reported a failure
    #[error("{operation} failed: {message}")]
    Feed {
        operation: Operation,
        message: String,
    },

    /// Listener could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// Server terminated with an I/O error
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Logging could not be initialized
    #[error("failed to initialize logging: {0}")]
    Telemetry(String),
}

impl SourceError {
    /// HTTP status reported to the caller for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Feed { .. } => StatusCode::BAD_GATEWAY,
            Self::Bind { .. } | Self::Serve(_) | Self::Telemetry(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SourceError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
