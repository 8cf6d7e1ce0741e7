use axum::{
    body::{to_bytes, Bytes},
    extract::{Request, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    body::InboundBody,
    error::{ErrorBody, RelayError},
    proxy::send_generate_request,
    RelayState,
};

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not Found")))
}

/// The relay endpoint. Preflights and foreign methods are answered here;
/// everything after method gating fails through one boundary as a JSON 500.
pub async fn relay(State(state): State<Arc<RelayState>>, request: Request) -> Response {
    match *request.method() {
        Method::OPTIONS => return StatusCode::OK.into_response(),
        Method::POST => {}
        _ => {
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorBody::new("Method Not Allowed")),
            )
                .into_response()
        }
    }

    let span = info_span!("relay", request_id = %Uuid::new_v4(), model = state.endpoint.model());
    match relay_payload(&state, request).instrument(span.clone()).await {
        Ok(data) => {
            (StatusCode::OK, [(CONTENT_TYPE, "application/json")], data).into_response()
        }
        Err(e) => {
            span.in_scope(|| error!(kind = e.kind(), "Relay failed: {}", e));
            e.into_response()
        }
    }
}

async fn relay_payload(state: &RelayState, request: Request) -> Result<Bytes, RelayError> {
    let api_key = state.keys.api_key().await?;

    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(request.into_body(), state.max_body_bytes)
        .await
        .map_err(|e| RelayError::Validation(format!("failed to read request body: {}", e)))?;
    info!(body_size = bytes.len(), "Incoming relay request");

    let payload = InboundBody::from_bytes(content_type.as_deref(), bytes).into_payload()?;
    let data = send_generate_request(&state.endpoint, &api_key, &payload).await?;

    info!("Relayed generative API response");
    Ok(data)
}
