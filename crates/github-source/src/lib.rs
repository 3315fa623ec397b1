//! GitHub webhook event source.
//!
//! This crate provides:
//! - A GitHub REST client for creating and deleting repository webhooks
//! - [`GitHubEventSource`], which subscribes a delivery route to a
//!   repository's `pull_request` events and tears the subscription down
//!
//! # Example
//!
//! ```no_run
//! use github_source::GitHubEventSource;
//! use sources::{run_event_source, ServerConfig};
//!
//! # async fn example() -> Result<(), sources::SourceError> {
//! run_event_source(GitHubEventSource::new(), &ServerConfig::default()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod hook;
pub mod params;
pub mod source;

pub use client::{GitHubClient, GITHUB_API_URL};
pub use error::{FeedError, GitHubError};
pub use hook::{Hook, HookConfig, HookSpec};
pub use params::{GitHubParameters, Repository, WebhookContext};
pub use source::GitHubEventSource;
