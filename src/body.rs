//! Normalizes the inbound request body into the relayed `payload` value.
//!
//! Browser callers often post JSON as `text/plain` to avoid a preflight, so the
//! body may arrive either as declared JSON or as text that still has to be
//! parsed. Both shapes end up as the same `serde_json::Value`.

use crate::error::RelayError;
use bytes::Bytes;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum InboundBody {
    Structured(Value),
    Text(String),
    Empty,
}

impl InboundBody {
    pub fn from_bytes(content_type: Option<&str>, bytes: Bytes) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return InboundBody::Empty;
        }

        if content_type.map_or(false, is_json_content_type) {
            if let Ok(value) = serde_json::from_slice::<Value>(&bytes) {
                return InboundBody::Structured(value);
            }
        }

        InboundBody::Text(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Extracts `payload` without looking inside it.
    pub fn into_payload(self) -> Result<Value, RelayError> {
        let body = match self {
            InboundBody::Structured(value) => value,
            InboundBody::Text(text) => serde_json::from_str(&text).map_err(|e| {
                RelayError::Validation(format!("request body is not valid JSON: {}", e))
            })?,
            InboundBody::Empty => return Err(RelayError::payload_not_found()),
        };

        match body {
            Value::Object(mut fields) => match fields.remove("payload") {
                Some(Value::Null) | None => Err(RelayError::payload_not_found()),
                Some(payload) => Ok(payload),
            },
            _ => Err(RelayError::payload_not_found()),
        }
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}
