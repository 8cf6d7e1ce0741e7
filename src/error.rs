use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message returned when the upstream error body carries no `error.message`.
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Error calling the generative API";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Request to generative API failed: {0}")]
    Transport(String),
}

impl RelayError {
    pub fn missing_api_key() -> Self {
        RelayError::Configuration("API key not configured".to_string())
    }

    pub fn payload_not_found() -> Self {
        RelayError::Validation("payload not found in the request".to_string())
    }

    /// Every failure kind is reported as 500 so existing callers keep working.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Configuration(_)
            | RelayError::Validation(_)
            | RelayError::Upstream(_)
            | RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Configuration(_) => "configuration",
            RelayError::Validation(_) => "validation",
            RelayError::Upstream(_) => "upstream",
            RelayError::Transport(_) => "transport",
        }
    }
}

// The outbound URL carries the key as a query parameter, so it must never
// reach a message that is logged or sent back.
impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Transport(e.without_url().to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
