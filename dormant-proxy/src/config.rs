// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_time::DormantTime;
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;

use crate::ProxyError;

/// Protocol relayed by a proxy
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyKind {
    /// plain HTTP request/response
    Http,
    /// websocket frames
    Ws,
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyKind::Http => write!(f, "http"),
            ProxyKind::Ws => write!(f, "ws"),
        }
    }
}

/// Settings of one proxy listener
#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    /// name used in logs
    pub name: String,
    /// protocol
    #[serde(rename = "type")]
    pub kind: ProxyKind,
    /// listening address
    pub proxy_addr: SocketAddr,
    /// base url of the upstream, `http://` or `ws://`
    pub upstream_addr: String,
    /// path prefixes relayed upstream, anything else is answered 404
    pub proxy_paths: Vec<String>,
    /// paths relayed without counting as activity
    #[serde(default)]
    pub ignore_paths_for_activity: Vec<String>,
    /// timeout reading a body, from the client or from the upstream
    pub read_timeout: DormantTime,
    /// timeout handing a request or a frame to the upstream
    pub write_timeout: DormantTime,
}

impl ProxyConfig {
    /// Basic sanity checks
    pub fn check(&self) -> Result<(), ProxyError> {
        if self.name.is_empty() {
            return Err(ProxyError::InvalidConfig("empty proxy name".into()));
        }
        if self.proxy_paths.is_empty() {
            return Err(ProxyError::InvalidConfig(format!(
                "{}: no proxy_paths, every request would be rejected",
                self.name
            )));
        }
        let scheme = match self.kind {
            ProxyKind::Http => "http://",
            ProxyKind::Ws => "ws://",
        };
        if !self.upstream_addr.starts_with(scheme) {
            return Err(ProxyError::InvalidConfig(format!(
                "{}: upstream_addr must start with {}",
                self.name, scheme
            )));
        }
        if self.read_timeout.is_zero() || self.write_timeout.is_zero() {
            return Err(ProxyError::InvalidConfig(format!(
                "{}: timeouts must be positive",
                self.name
            )));
        }
        Ok(())
    }

    /// whether `path` is relayed at all
    pub fn is_proxied(&self, path: &str) -> bool {
        self.proxy_paths
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// upstream url for a path and query received by the proxy
    pub fn upstream_url(&self, path_and_query: &str) -> String {
        format!(
            "{}{}",
            self.upstream_addr.trim_end_matches('/'),
            path_and_query
        )
    }
}
