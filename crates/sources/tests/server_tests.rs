//! Router tests for the feed lifecycle API.
//!
//! These drive the axum router directly with a recording fake source, so
//! no listener or network access is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sources::{build_router, EventSource, EventTrigger, FeedContext};
use tokio::sync::Mutex;
use tower::ServiceExt;

// =============================================================================
// Fake Source
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FakeParameters {
    access_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct FakeContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
#[error("upstream rejected request")]
struct FakeError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Start {
        resource: String,
        token: String,
        route: String,
    },
    Stop {
        resource: String,
        id: Option<u64>,
    },
}

#[derive(Default)]
struct FakeSource {
    calls: Mutex<Vec<Call>>,
    fail: bool,
}

#[async_trait]
impl EventSource for FakeSource {
    type Parameters = FakeParameters;
    type Context = FakeContext;
    type Error = FakeError;

    fn name(&self) -> &'static str {
        "fake"
    }

    async fn start_feed(
        &self,
        trigger: &EventTrigger<FakeParameters>,
        route: &str,
    ) -> Result<FeedContext<FakeContext>, FakeError> {
        self.calls.lock().await.push(Call::Start {
            resource: trigger.resource.clone(),
            token: trigger.parameters.access_token.clone(),
            route: route.to_string(),
        });
        if self.fail {
            return Err(FakeError);
        }
        Ok(FeedContext::new(FakeContext { id: Some(555) }))
    }

    async fn stop_feed(
        &self,
        trigger: &EventTrigger<FakeParameters>,
        feed_context: &FeedContext<FakeContext>,
    ) -> Result<(), FakeError> {
        self.calls.lock().await.push(Call::Stop {
            resource: trigger.resource.clone(),
            id: feed_context.context.id,
        });
        if self.fail {
            return Err(FakeError);
        }
        Ok(())
    }
}

fn app(source: &Arc<FakeSource>) -> Router {
    build_router(Arc::clone(source))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_start_feed_returns_context() {
    let source = Arc::new(FakeSource::default());

    let (status, body) = post_json(
        app(&source),
        "/feeds/start",
        json!({
            "trigger": {"resource": "acme/widgets", "parameters": {"accessToken": "tok123"}},
            "route": "example.com/hook"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"context": {"id": 555}}));
    assert_eq!(
        *source.calls.lock().await,
        vec![Call::Start {
            resource: "acme/widgets".to_string(),
            token: "tok123".to_string(),
            route: "example.com/hook".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_start_feed_missing_parameter_never_reaches_source() {
    let source = Arc::new(FakeSource::default());

    let (status, body) = post_json(
        app(&source),
        "/feeds/start",
        json!({
            "trigger": {"resource": "acme/widgets", "parameters": {}},
            "route": "example.com/hook"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("accessToken"));
    assert!(source.calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_start_feed_source_failure() {
    let source = Arc::new(FakeSource {
        fail: true,
        ..FakeSource::default()
    });

    let (status, body) = post_json(
        app(&source),
        "/feeds/start",
        json!({
            "trigger": {"resource": "acme/widgets", "parameters": {"accessToken": "tok123"}},
            "route": "example.com/hook"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["error"],
        "start feed failed: upstream rejected request"
    );
}

#[tokio::test]
async fn test_stop_feed_passes_context_through() {
    let source = Arc::new(FakeSource::default());

    let (status, _) = post_json(
        app(&source),
        "/feeds/stop",
        json!({
            "trigger": {"resource": "acme/widgets", "parameters": {"accessToken": "tok123"}},
            "feedContext": {"context": {"id": 555}}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        *source.calls.lock().await,
        vec![Call::Stop {
            resource: "acme/widgets".to_string(),
            id: Some(555),
        }]
    );
}

#[tokio::test]
async fn test_stop_feed_without_context_uses_default() {
    let source = Arc::new(FakeSource::default());

    let (status, _) = post_json(
        app(&source),
        "/feeds/stop",
        json!({
            "trigger": {"resource": "acme/widgets", "parameters": {"accessToken": "tok123"}}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        *source.calls.lock().await,
        vec![Call::Stop {
            resource: "acme/widgets".to_string(),
            id: None,
        }]
    );
}

#[tokio::test]
async fn test_stop_feed_source_failure() {
    let source = Arc::new(FakeSource {
        fail: true,
        ..FakeSource::default()
    });

    let (status, body) = post_json(
        app(&source),
        "/feeds/stop",
        json!({
            "trigger": {"resource": "acme/widgets", "parameters": {"accessToken": "tok123"}},
            "feedContext": {"context": {"id": 7}}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "stop feed failed: upstream rejected request");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let source = Arc::new(FakeSource::default());

    let request = Request::post("/feeds/stop")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(&source).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(source.calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_health_check() {
    let source = Arc::new(FakeSource::default());

    let request = Request::get("/health").body(Body::empty()).unwrap();
    let response = app(&source).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "ok", "source": "fake"}));
}
