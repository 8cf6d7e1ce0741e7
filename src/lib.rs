//! A single-endpoint relay in front of the Gemini `generateContent` API.
//!
//! Callers post `{"payload": ...}`; the payload is forwarded verbatim with a
//! server-held key and the upstream JSON comes back unchanged. Failures are
//! reported as `500 {"error": "..."}` and every response carries a permissive
//! CORS policy so browser front ends on other origins can call it.

use axum::{
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod body;
pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod keys;
pub mod proxy;

use crate::{
    config::{AppConfig, DEFAULT_MAX_BODY_BYTES},
    keys::{ApiKeySource, EnvApiKey},
    proxy::GenerateEndpoint,
};

/// Immutable per-process state shared by all relay invocations.
pub struct RelayState {
    pub endpoint: GenerateEndpoint,
    pub keys: Arc<dyn ApiKeySource>,
    pub max_body_bytes: usize,
}

impl RelayState {
    pub fn new(endpoint: GenerateEndpoint, keys: Arc<dyn ApiKeySource>) -> Self {
        Self {
            endpoint,
            keys,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            GenerateEndpoint::new(config.api_base.clone(), config.model.clone()),
            Arc::new(EnvApiKey::new(config.api_key_var.clone())),
        )
        .with_max_body_bytes(config.max_body_bytes)
    }
}

/// Builds the router with the relay mounted at `relay_path`.
pub fn app(state: RelayState, relay_path: &str) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(relay_path, any(handlers::relay))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(cors::cors_headers))
}
