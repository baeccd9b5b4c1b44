//! AskData Transport
//!
//! The transport collaborator: hands a question to the analytics service and
//! returns its raw answer.
//!
//! - `HttpTransport` - reqwest-backed, with timeout and proxy support
//! - `DemoTransport` - keyword-matched fixtures, no network
//!
//! `build_transport` picks one from an explicit `demo_mode` flag.

pub mod demo;
pub mod http;
pub mod http_client;
pub mod transport;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

// Re-export main types
pub use demo::{DemoTopic, DemoTransport};
pub use http::HttpTransport;
pub use http_client::build_http_client;
pub use transport::{parse_http_error, QueryTransport};
pub use types::*;

/// Build the transport selected by `config.demo_mode`.
pub fn build_transport(config: &TransportConfig) -> TransportResult<Arc<dyn QueryTransport>> {
    if config.demo_mode {
        tracing::info!("[Transport] Demo mode enabled, answering from fixtures");
        return Ok(Arc::new(DemoTransport::new(Duration::from_millis(
            config.demo_delay_ms,
        ))));
    }
    tracing::info!("[Transport] Using analytics service at {}", config.api_url);
    Ok(Arc::new(HttpTransport::new(config)?))
}
