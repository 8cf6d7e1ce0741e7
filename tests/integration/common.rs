use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use gemini_relay::{
    app,
    keys::{ApiKeySource, StaticApiKey},
    proxy::GenerateEndpoint,
    RelayState,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const RELAY_PATH: &str = "/api/generate";
pub const TEST_MODEL: &str = "gemini-test";
pub const TEST_KEY: &str = "test-secret-key";

/// Path the mock upstream must match for `TEST_MODEL`.
pub fn generate_path() -> String {
    format!("/v1beta/models/{}:generateContent", TEST_MODEL)
}

pub fn relay_app(upstream_base: &str, keys: Arc<dyn ApiKeySource>) -> Router {
    let state = RelayState::new(GenerateEndpoint::new(upstream_base, TEST_MODEL), keys);
    app(state, RELAY_PATH)
}

/// Router with a configured key. The upstream is unreachable, which is fine
/// for tests that never get past method gating.
pub fn offline_app() -> Router {
    relay_app("http://127.0.0.1:9", Arc::new(StaticApiKey::new(TEST_KEY)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }

    pub fn error_message(&self) -> String {
        self.json()["error"]
            .as_str()
            .expect("error field should be a string")
            .to_string()
    }
}

pub async fn send(
    app: Router,
    method: Method,
    content_type: Option<&str>,
    body: impl Into<Body>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(RELAY_PATH);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }

    let response = app
        .oneshot(builder.body(body.into()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn post_json(app: Router, body: &Value) -> TestResponse {
    send(app, Method::POST, Some("application/json"), body.to_string()).await
}

pub fn assert_cors(response: &TestResponse) {
    let header = |name: &str| {
        response
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    assert_eq!(header("access-control-allow-origin").as_deref(), Some("*"));
    assert_eq!(
        header("access-control-allow-methods").as_deref(),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        header("access-control-allow-headers").as_deref(),
        Some("Content-Type")
    );
}
