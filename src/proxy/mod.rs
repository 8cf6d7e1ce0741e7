use crate::error::{RelayError, UPSTREAM_FALLBACK_MESSAGE};
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};

mod client;
pub use client::CLIENT;

/// The single Gemini resource every payload is sent to.
#[derive(Debug, Clone)]
pub struct GenerateEndpoint {
    base_url: String,
    model: String,
}

impl GenerateEndpoint {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// URL without the key, safe to log.
    pub fn redacted_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn url(&self, api_key: &SecretString) -> Result<reqwest::Url, RelayError> {
        reqwest::Url::parse_with_params(&self.redacted_url(), &[("key", api_key.expose_secret())])
            .map_err(|e| RelayError::Configuration(format!("invalid generative API URL: {}", e)))
    }
}

/// Sends `payload` and returns the upstream body exactly as received, once it
/// is known to be JSON.
pub async fn send_generate_request(
    endpoint: &GenerateEndpoint,
    api_key: &SecretString,
    payload: &Value,
) -> Result<Bytes, RelayError> {
    let url = endpoint.url(api_key)?;
    debug!(url = %endpoint.redacted_url(), "Sending generateContent request");

    let response = CLIENT
        .post(url)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    let body = response.bytes().await?;
    let data: Value = serde_json::from_slice(&body)
        .map_err(|e| RelayError::Transport(format!("response is not valid JSON: {}", e)))?;

    if !status.is_success() {
        warn!(status = %status, "Generative API returned an error status");
        return Err(RelayError::Upstream(upstream_message(&data)));
    }

    Ok(body)
}

fn upstream_message(data: &Value) -> String {
    data.pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string())
}
