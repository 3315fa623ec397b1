//! Event source plugin contract and run-loop.
//!
//! An event source turns a subscription request (an [`EventTrigger`]) into
//! an external registration that pushes events to a delivery route, and
//! later tears that registration down again. The only state an event
//! source produces is a [`FeedContext`], which the caller stores and hands
//! back unchanged on stop.
//!
//! # Usage
//!
//! ```no_run
//! use sources::{run_event_source, EventSource, ServerConfig};
//!
//! # async fn example<S: EventSource>(
//! #     source: S,
//! #     config: ServerConfig,
//! # ) -> Result<(), sources::SourceError> {
//! // Blocks until SIGINT/SIGTERM
//! run_event_source(source, &config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`EventSource`] trait defines the two lifecycle operations
//! - [`server`] exposes them over HTTP and owns the process lifetime
//! - [`telemetry`] sets up structured logging for the process

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod feed;
pub mod server;
pub mod telemetry;

pub use config::{LogFormat, ServerConfig};
pub use error::{Operation, SourceError};
pub use feed::{EventTrigger, FeedContext};
pub use server::{build_router, run_event_source};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Trait for event sources (GitHub webhooks, etc.).
///
/// Implementations must not keep mutable state between calls: the run-loop
/// may invoke `start_feed` and `stop_feed` concurrently for different
/// subscriptions.
#[async_trait]
pub trait EventSource: Send + Sync + 'static {
    /// Typed trigger parameters, validated when a request is decoded.
    type Parameters: DeserializeOwned + Send + Sync + 'static;

    /// State returned by `start_feed` and required by `stop_feed`.
    type Context: Serialize + DeserializeOwned + Default + Send + Sync + 'static;

    /// Failure of a lifecycle operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Get the name of this event source.
    fn name(&self) -> &'static str;

    /// Register a subscription that delivers events to `route`.
    async fn start_feed(
        &self,
        trigger: &EventTrigger<Self::Parameters>,
        route: &str,
    ) -> Result<FeedContext<Self::Context>, Self::Error>;

    /// Tear down the subscription described by `feed_context`.
    async fn stop_feed(
        &self,
        trigger: &EventTrigger<Self::Parameters>,
        feed_context: &FeedContext<Self::Context>,
    ) -> Result<(), Self::Error>;
}
