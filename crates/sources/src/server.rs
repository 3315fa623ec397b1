//! HTTP run-loop exposing an event source's feed lifecycle.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::{Operation, SourceError};
use crate::feed::{EventTrigger, FeedContext};
use crate::EventSource;

/// Request body for `POST /feeds/start`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartFeedRequest<P> {
    trigger: EventTrigger<P>,
    route: String,
}

/// Request body for `POST /feeds/stop`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StopFeedRequest<P, C> {
    trigger: EventTrigger<P>,
    #[serde(default)]
    feed_context: FeedContext<C>,
}

/// Build the HTTP router for an event source.
pub fn build_router<S: EventSource>(source: Arc<S>) -> Router {
    Router::new()
        .route("/feeds/start", post(start_feed::<S>))
        .route("/feeds/stop", post(stop_feed::<S>))
        .route("/health", get(health_check::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(source)
}

/// Serve `source` until the process receives SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_event_source<S: EventSource>(
    source: S,
    config: &ServerConfig,
) -> Result<(), SourceError> {
    let name = source.name();
    let app = build_router(Arc::new(source));

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| SourceError::Bind {
            addr: config.bind,
            source,
        })?;

    info!(source = name, addr = %config.bind, "Event source listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(SourceError::Serve)?;

    info!(source = name, "Event source stopped");
    Ok(())
}

fn decode<T: DeserializeOwned>(operation: Operation, body: &[u8]) -> Result<T, SourceError> {
    serde_json::from_slice(body).map_err(|source| {
        warn!(%operation, error = %source, "Rejected malformed request");
        SourceError::InvalidRequest { operation, source }
    })
}

async fn start_feed<S: EventSource>(
    State(source): State<Arc<S>>,
    body: Bytes,
) -> Result<Json<FeedContext<S::Context>>, SourceError> {
    let request: StartFeedRequest<S::Parameters> = decode(Operation::Start, &body)?;

    debug!(
        resource = %request.trigger.resource,
        route = %request.route,
        "Starting feed"
    );

    match source.start_feed(&request.trigger, &request.route).await {
        Ok(feed_context) => Ok(Json(feed_context)),
        Err(e) => {
            error!(resource = %request.trigger.resource, error = %e, "Failed to start feed");
            Err(SourceError::Feed {
                operation: Operation::Start,
                message: e.to_string(),
            })
        }
    }
}

async fn stop_feed<S: EventSource>(
    State(source): State<Arc<S>>,
    body: Bytes,
) -> Result<StatusCode, SourceError> {
    let request: StopFeedRequest<S::Parameters, S::Context> = decode(Operation::Stop, &body)?;

    debug!(resource = %request.trigger.resource, "Stopping feed");

    match source
        .stop_feed(&request.trigger, &request.feed_context)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!(resource = %request.trigger.resource, error = %e, "Failed to stop feed");
            Err(SourceError::Feed {
                operation: Operation::Stop,
                message: e.to_string(),
            })
        }
    }
}

async fn health_check<S: EventSource>(State(source): State<Arc<S>>) -> Json<Value> {
    Json(json!({ "status": "ok", "source": source.name() }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
