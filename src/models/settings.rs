//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};

use askdata_charts::ValidationOptions;
use askdata_core::ProxyConfig;
use askdata_transport::{TransportConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_MS};

use crate::utils::error::AppResult;

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Analytics service endpoint
    pub api_url: String,
    /// Request timeout in milliseconds
    pub api_timeout_ms: u64,
    /// Lower the default log level to debug
    #[serde(default)]
    pub enable_debug_logging: bool,
    /// Answer from built-in fixtures instead of the network
    #[serde(default)]
    pub demo_mode: bool,
    /// Simulated latency of demo answers
    #[serde(default = "default_demo_delay_ms")]
    pub demo_delay_ms: u64,
    /// Let charts with an unrecognized chart_type through (drawn as bar)
    #[serde(default)]
    pub accept_unknown_chart_types: bool,
    /// Exchanges kept in the session history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

fn default_demo_delay_ms() -> u64 {
    1000
}

fn default_history_limit() -> usize {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout_ms: DEFAULT_TIMEOUT_MS,
            enable_debug_logging: false,
            demo_mode: false,
            demo_delay_ms: default_demo_delay_ms(),
            accept_unknown_chart_types: false,
            history_limit: default_history_limit(),
            proxy: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub api_url: Option<String>,
    pub api_timeout_ms: Option<u64>,
    pub enable_debug_logging: Option<bool>,
    pub demo_mode: Option<bool>,
    pub demo_delay_ms: Option<u64>,
    pub accept_unknown_chart_types: Option<bool>,
    pub history_limit: Option<usize>,
    /// `Some(None)` clears the proxy
    pub proxy: Option<Option<ProxyConfig>>,
}

impl SettingsUpdate {
    /// Turn a proxy setting from the command line into an update value.
    ///
    /// `none` or an empty string clears the proxy; anything else must be a
    /// proxy URL.
    pub fn proxy_from_arg(arg: &str) -> AppResult<Option<ProxyConfig>> {
        match arg.trim() {
            "" | "none" => Ok(None),
            url => Ok(Some(ProxyConfig::parse(url)?)),
        }
    }
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(api_url) = update.api_url {
            self.api_url = api_url;
        }
        if let Some(timeout) = update.api_timeout_ms {
            self.api_timeout_ms = timeout;
        }
        if let Some(debug) = update.enable_debug_logging {
            self.enable_debug_logging = debug;
        }
        if let Some(demo) = update.demo_mode {
            self.demo_mode = demo;
        }
        if let Some(delay) = update.demo_delay_ms {
            self.demo_delay_ms = delay;
        }
        if let Some(accept) = update.accept_unknown_chart_types {
            self.accept_unknown_chart_types = accept;
        }
        if let Some(limit) = update.history_limit {
            self.history_limit = limit;
        }
        if let Some(proxy) = update.proxy {
            self.proxy = proxy;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.trim().is_empty() {
            return Err("api_url cannot be empty".to_string());
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(format!(
                "Invalid api_url: {}. Must start with http:// or https://",
                self.api_url
            ));
        }

        if self.api_timeout_ms == 0 {
            return Err("api_timeout_ms must be greater than 0".to_string());
        }

        if self.history_limit == 0 {
            return Err("history_limit must be at least 1".to_string());
        }

        Ok(())
    }

    /// Connection settings for the transport factory
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            api_url: self.api_url.clone(),
            timeout_ms: self.api_timeout_ms,
            proxy: self.proxy.clone(),
            demo_mode: self.demo_mode,
            demo_delay_ms: self.demo_delay_ms,
        }
    }

    /// Options for the chart validator
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            accept_unknown_chart_types: self.accept_unknown_chart_types,
        }
    }
}
