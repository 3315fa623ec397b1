//! GitHub repository webhook types.

use serde::{Deserialize, Serialize};

/// Name GitHub requires for repository webhooks.
pub const HOOK_NAME: &str = "web";

/// Event the feed subscribes to.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Payload format requested from GitHub.
pub const CONTENT_TYPE_JSON: &str = "json";

/// Webhook delivery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    pub url: String,
    pub content_type: String,
    /// GitHub masks this in responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_ssl: Option<String>,
}

/// Request body to create a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookSpec {
    pub name: String,
    pub active: bool,
    pub events: Vec<String>,
    pub config: HookConfig,
}

impl HookSpec {
    /// Webhook delivering `pull_request` events as JSON to `http://<route>`,
    /// signed with `secret`.
    #[must_use]
    pub fn pull_request(route: &str, secret: &str) -> Self {
        Self {
            name: HOOK_NAME.to_string(),
            active: true,
            events: vec![PULL_REQUEST_EVENT.to_string()],
            config: HookConfig {
                url: format!("http://{route}"),
                content_type: CONTENT_TYPE_JSON.to_string(),
                secret: Some(secret.to_string()),
                insecure_ssl: None,
            },
        }
    }
}

/// GitHub webhook response.
#[derive(Debug, Clone, Deserialize)]
pub struct Hook {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub events: Vec<String>,
    pub config: Option<HookConfig>,
}
