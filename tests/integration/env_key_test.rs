use super::common::{assert_cors, generate_path, post_json};
use axum::http::StatusCode;
use gemini_relay::{config::AppConfig, app, RelayState};
use serde_json::json;
use serial_test::serial;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const KEY_VAR: &str = "GEMINI_RELAY_IT_KEY";

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        api_base: server.uri(),
        model: "gemini-test".to_string(),
        api_key_var: KEY_VAR.to_string(),
        ..AppConfig::default()
    }
}

#[tokio::test]
#[serial]
async fn test_env_key_is_read_per_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(query_param("key", "rotated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let router = app(RelayState::from_config(&config), &config.relay_path);
    let body = json!({ "payload": { "x": 1 } });

    std::env::remove_var(KEY_VAR);
    let response = post_json(router.clone(), &body).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_message(), "API key not configured");
    assert_cors(&response);

    std::env::set_var(KEY_VAR, "rotated");
    let response = post_json(router, &body).await;
    std::env::remove_var(KEY_VAR);

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "candidates": [] }));
}
