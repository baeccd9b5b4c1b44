//! HTTP Client Factory
//!
//! Builds reqwest clients with timeout and proxy settings applied.

use std::time::Duration;

use askdata_core::ProxyConfig;

use crate::types::{TransportError, TransportResult};

/// Build a `reqwest::Client`.
///
/// - `Some(proxy)` -> route every request through the proxy
/// - `None` -> explicitly disable proxies (`no_proxy`), ignoring env vars
pub fn build_http_client(
    proxy: Option<&ProxyConfig>,
    timeout: Duration,
) -> TransportResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(timeout);
    match proxy {
        Some(cfg) => {
            let mut p = reqwest::Proxy::all(cfg.url()).map_err(|e| {
                TransportError::InvalidRequest {
                    message: format!("invalid proxy {}: {}", cfg.url(), e),
                    status: None,
                }
            })?;
            if let (Some(u), Some(pw)) = (&cfg.username, &cfg.password) {
                p = p.basic_auth(u, pw);
            }
            builder = builder.proxy(p);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    builder.build().map_err(|e| TransportError::Other {
        message: format!("failed to build HTTP client: {}", e),
    })
}
