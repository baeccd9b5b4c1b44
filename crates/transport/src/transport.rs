//! Query Transport Trait
//!
//! The single suspension point of a question: hand the question to the
//! analytics service and get its raw answer back. Transports never retry.

use async_trait::async_trait;

use askdata_core::RawChatResponse;

use crate::types::{TransportError, TransportResult};

/// Trait that every transport implements.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Short name for logs (`http`, `demo`).
    fn name(&self) -> &'static str;

    /// Send one question and return the service's raw payload.
    async fn send(&self, question: &str) -> TransportResult<RawChatResponse>;
}

/// Map a non-success HTTP status and its body to a transport error.
pub fn parse_http_error(status: u16, body: &str) -> TransportError {
    let message = error_message(status, body);
    match status {
        400 | 404 | 405 | 413 | 422 => TransportError::InvalidRequest {
            message,
            status: Some(status),
        },
        _ => TransportError::ServerError { status, message },
    }
}

/// Prefer a `message`/`error`/`detail` field of a JSON body, then the raw
/// body, then the status reason phrase.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(serde_json::Value::String(text)) = map.get(key) {
                if !text.trim().is_empty() {
                    return text.trim().to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}
