// Copyright (c) 2022 MASSA LABS <info@massa.net>

use serde::Deserialize;
use std::net::SocketAddr;

/// API settings.
#[derive(Debug, Deserialize, Clone)]
pub struct APIConfig {
    /// bind for the control API
    pub bind: SocketAddr,
    /// maximum size in bytes of a request.
    pub max_request_body_size: u32,
    /// maximum size in bytes of a response.
    pub max_response_body_size: u32,
    /// maximum number of incoming connections allowed.
    pub max_connections: u32,
    /// host filtering.
    #[serde(default)]
    pub allow_hosts: Vec<String>,
    /// max number of calls in a batch, 0 disables batches
    pub batch_request_limit: u32,
}
