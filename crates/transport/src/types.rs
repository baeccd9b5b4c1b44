//! Transport Types
//!
//! Error type and connection settings shared by every transport.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use askdata_core::ProxyConfig;

/// Default analytics endpoint
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api/query";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Everything needed to build a transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    pub api_url: String,
    pub timeout_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    /// Answer from built-in fixtures instead of the network
    #[serde(default)]
    pub demo_mode: bool,
    /// Simulated latency of demo answers
    #[serde(default)]
    pub demo_delay_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            proxy: None,
            demo_mode: false,
            demo_delay_ms: 0,
        }
    }
}

impl TransportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Error types for transport operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportError {
    /// Connection could not be established or was dropped
    NetworkError { message: String },
    /// No answer within the configured timeout
    Timeout { after_ms: u64 },
    /// The service answered with a non-success status
    ServerError { status: u16, message: String },
    /// The request was rejected before or by the service
    InvalidRequest {
        message: String,
        status: Option<u16>,
    },
    /// The answer body was not a valid response envelope
    ParseError { message: String },
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::NetworkError { message } => write!(f, "Error: {}", message),
            TransportError::Timeout { after_ms } => {
                write!(f, "Error: request timed out after {} ms", after_ms)
            }
            TransportError::ServerError { status, message } => {
                write!(f, "Error Code: {}\nMessage: {}", status, message)
            }
            TransportError::InvalidRequest { message, status } => match status {
                Some(s) => write!(f, "Error Code: {}\nMessage: {}", s, message),
                None => write!(f, "Invalid request: {}", message),
            },
            TransportError::ParseError { message } => {
                write!(f, "Error: unreadable response from server: {}", message)
            }
            TransportError::Other { message } => write!(f, "Error: {}", message),
        }
    }
}

impl std::error::Error for TransportError {}

impl TransportError {
    /// Whether the service was never reached.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            TransportError::NetworkError { .. } | TransportError::Timeout { .. }
        )
    }
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
