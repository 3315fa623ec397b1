//! Trigger and feed-context types exchanged with event sources.

use serde::{Deserialize, Serialize};

/// A subscription request.
///
/// `resource` identifies what to subscribe to (its format is defined by
/// the event source); `parameters` carries the source's typed settings
/// such as credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTrigger<P> {
    pub resource: String,
    pub parameters: P,
}

impl<P> EventTrigger<P> {
    /// Create a new trigger.
    pub fn new(resource: impl Into<String>, parameters: P) -> Self {
        Self {
            resource: resource.into(),
            parameters,
        }
    }
}

/// State produced by `start_feed` and handed back to `stop_feed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedContext<C> {
    #[serde(default)]
    pub context: C,
}

impl<C> FeedContext<C> {
    /// Wrap a source-specific context.
    pub const fn new(context: C) -> Self {
        Self { context }
    }
}
