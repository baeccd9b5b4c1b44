//! HTTP Transport
//!
//! POSTs `{"query": question}` to the analytics endpoint.

use async_trait::async_trait;
use serde::Serialize;

use askdata_core::RawChatResponse;

use crate::http_client::build_http_client;
use crate::transport::{parse_http_error, QueryTransport};
use crate::types::{TransportConfig, TransportError, TransportResult};

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

/// Transport backed by the real analytics service.
pub struct HttpTransport {
    api_url: String,
    timeout_ms: u64,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> TransportResult<Self> {
        if config.api_url.trim().is_empty() {
            return Err(TransportError::InvalidRequest {
                message: "API URL is not configured".to_string(),
                status: None,
            });
        }
        let client = build_http_client(config.proxy.as_ref(), config.timeout())?;
        Ok(Self {
            api_url: config.api_url.clone(),
            timeout_ms: config.timeout_ms,
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                after_ms: self.timeout_ms,
            }
        } else {
            TransportError::NetworkError {
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn send(&self, question: &str) -> TransportResult<RawChatResponse> {
        tracing::debug!("[HttpTransport] POST {}", self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&QueryRequest { query: question })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !(200..300).contains(&status) {
            let err = parse_http_error(status, &body_text);
            tracing::warn!("[HttpTransport] Request failed: {}", err);
            return Err(err);
        }

        serde_json::from_str::<RawChatResponse>(&body_text).map_err(|e| {
            TransportError::ParseError {
                message: format!("Failed to parse response: {}", e),
            }
        })
    }
}
