//! Typed trigger parameters, repository resource, and feed context.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FeedError;

/// Parameters a GitHub trigger must carry.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubParameters {
    /// Token used to call the GitHub API.
    pub access_token: String,
    /// Secret GitHub signs deliveries with.
    pub secret_token: String,
}

impl fmt::Debug for GitHubParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubParameters")
            .field("access_token", &"<redacted>")
            .field("secret_token", &"<redacted>")
            .finish()
    }
}

/// A repository named by a trigger resource of the form `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = FeedError;

    fn from_str(resource: &str) -> Result<Self, Self::Err> {
        match resource.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: (*owner).to_string(),
                name: (*name).to_string(),
            }),
            _ => Err(FeedError::InvalidResource(resource.to_string())),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Feed context of a GitHub webhook subscription.
///
/// On the wire the id is a decimal string under `id`; a JSON integer is
/// accepted too. `None` means no webhook was ever created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookContext {
    #[serde(
        rename = "id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_webhook_id",
        deserialize_with = "deserialize_webhook_id"
    )]
    pub webhook_id: Option<i64>,
}

impl WebhookContext {
    /// Context for a created webhook.
    #[must_use]
    pub const fn created(webhook_id: i64) -> Self {
        Self {
            webhook_id: Some(webhook_id),
        }
    }
}

#[allow(clippy::ref_option)]
fn serialize_webhook_id<S: Serializer>(id: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => serializer.serialize_str(&id.to_string()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_webhook_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(raw)) => raw.parse().map(Some).map_err(|e| {
            serde::de::Error::custom(format!("invalid webhook id {raw:?}: {e}"))
        }),
    }
}
