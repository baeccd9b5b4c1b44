//! Proxy Configuration Types
//!
//! Proxy settings for the connection to the analytics service. The HTTP
//! client factory that consumes them lives in the `askdata-transport` crate.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Proxy protocol type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Http,
    Https,
    Socks5,
}

impl ProxyProtocol {
    /// Return the URL scheme string for this protocol.
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Https => "https",
            ProxyProtocol::Socks5 => "socks5",
        }
    }

    fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_lowercase().as_str() {
            "http" => Some(ProxyProtocol::Http),
            "https" => Some(ProxyProtocol::Https),
            "socks5" | "socks5h" => Some(ProxyProtocol::Socks5),
            _ => None,
        }
    }
}

/// Proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    pub protocol: ProxyProtocol,
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Only held in memory; never written to the config file.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Parse `scheme://[user[:password]@]host:port`.
    pub fn parse(url: &str) -> CoreResult<Self> {
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| CoreError::parse(format!("proxy URL has no scheme: {}", url)))?;
        let protocol = ProxyProtocol::from_scheme(scheme)
            .ok_or_else(|| CoreError::parse(format!("unsupported proxy scheme: {}", scheme)))?;

        let rest = rest.trim_end_matches('/');
        let (auth, address) = match rest.rsplit_once('@') {
            Some((auth, address)) => (Some(auth), address),
            None => (None, rest),
        };
        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| CoreError::parse(format!("proxy URL has no port: {}", url)))?;
        if host.is_empty() {
            return Err(CoreError::parse(format!("proxy URL has no host: {}", url)));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| CoreError::parse(format!("invalid proxy port: {}", port)))?;

        let (username, password) = match auth {
            Some(auth) => match auth.split_once(':') {
                Some((u, p)) => (Some(u.to_string()), Some(p.to_string())),
                None => (Some(auth.to_string()), None),
            },
            None => (None, None),
        };

        Ok(Self {
            protocol,
            host: host.to_string(),
            port,
            username,
            password,
        })
    }

    /// Build the proxy URL string (without auth).
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }
}
