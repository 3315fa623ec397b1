//! GitHub webhook event source.

use async_trait::async_trait;
use sources::{EventSource, EventTrigger, FeedContext};
use tracing::{error, info, warn};

use crate::client::{GitHubClient, GITHUB_API_URL};
use crate::error::FeedError;
use crate::hook::HookSpec;
use crate::params::{GitHubParameters, Repository, WebhookContext};

/// Event source that registers `pull_request` webhooks on GitHub repositories.
///
/// Holds no per-subscription state: every call builds its own client from
/// the trigger's access token, and the created webhook id travels back to
/// the caller in the [`WebhookContext`].
#[derive(Debug, Clone)]
pub struct GitHubEventSource {
    api_url: String,
}

impl GitHubEventSource {
    /// Create an event source talking to the public GitHub API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_api_url(GITHUB_API_URL)
    }

    /// Create an event source talking to a custom API endpoint
    /// (GitHub Enterprise, or a mock server in tests).
    #[must_use]
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// API endpoint this source talks to.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn client(&self, params: &GitHubParameters) -> Result<GitHubClient, FeedError> {
        Ok(GitHubClient::new(&params.access_token, &self.api_url)?)
    }
}

impl Default for GitHubEventSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSource for GitHubEventSource {
    type Parameters = GitHubParameters;
    type Context = WebhookContext;
    type Error = FeedError;

    fn name(&self) -> &'static str {
        "github"
    }

    async fn start_feed(
        &self,
        trigger: &EventTrigger<GitHubParameters>,
        route: &str,
    ) -> Result<FeedContext<WebhookContext>, FeedError> {
        info!(resource = %trigger.resource, route = %route, "Creating GitHub webhook");

        let repository: Repository = trigger.resource.parse()?;
        let client = self.client(&trigger.parameters)?;
        let spec = HookSpec::pull_request(route, &trigger.parameters.secret_token);

        let hook = client
            .create_hook(&repository.owner, &repository.name, &spec)
            .await
            .map_err(|e| {
                error!(repository = %repository, error = %e, "Failed to create the webhook");
                e
            })?;

        info!(
            owner = %repository.owner,
            repo = %repository.name,
            hook_id = hook.id,
            "Created GitHub webhook"
        );

        Ok(FeedContext::new(WebhookContext::created(hook.id)))
    }

    async fn stop_feed(
        &self,
        trigger: &EventTrigger<GitHubParameters>,
        feed_context: &FeedContext<WebhookContext>,
    ) -> Result<(), FeedError> {
        info!(
            resource = %trigger.resource,
            context = ?feed_context.context,
            "Stopping GitHub webhook feed"
        );

        let repository: Repository = trigger.resource.parse()?;

        let Some(hook_id) = feed_context.context.webhook_id else {
            info!(repository = %repository, "No webhook id found, nothing to delete");
            return Ok(());
        };

        let client = self.client(&trigger.parameters)?;

        match client
            .delete_hook(&repository.owner, &repository.name, hook_id)
            .await
        {
            Ok(()) => {
                info!(repository = %repository, hook_id, "Deleted GitHub webhook");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                warn!(
                    repository = %repository,
                    hook_id,
                    "Webhook doesn't exist, nothing to delete"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    repository = %repository,
                    hook_id,
                    error = %e,
                    "Failed to delete the webhook"
                );
                Err(e.into())
            }
        }
    }
}
