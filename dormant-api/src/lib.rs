//! Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Json RPC control API of a node-manager
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]
use dormant_api_exports::{config::APIConfig, error::ApiError, DormantRpcServer};
use dormant_control_exports::NodeControlController;
use http::{header, Method};
use jsonrpsee::server::middleware::http::HostFilterLayer;
use jsonrpsee::server::{BatchRequestConfig, ServerBuilder, ServerHandle};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

mod control;

/// Control API content
pub struct Control {
    /// link to the node control worker
    pub node_controller: Box<dyn NodeControlController>,
}

/// The API wrapper
pub struct API<T>(T);

/// Used to manage the API
#[async_trait::async_trait]
pub trait RpcServer: DormantRpcServer {
    /// Start the API
    async fn serve(self, url: &SocketAddr, api_config: &APIConfig)
        -> Result<StopHandle, ApiError>;
}

async fn serve<T>(
    api: RpcModule<T>,
    url: &SocketAddr,
    api_config: &APIConfig,
) -> Result<StopHandle, ApiError> {
    let host_filter = if api_config.allow_hosts.is_empty() {
        None
    } else {
        Some(
            HostFilterLayer::new(api_config.allow_hosts.iter().map(String::as_str))
                .map_err(|err| ApiError::ServerError(format!("invalid allow_hosts: {}", err)))?,
        )
    };

    let cors = CorsLayer::new()
        // Allow `POST` and `OPTIONS` when accessing the resource
        .allow_methods([Method::POST, Method::OPTIONS])
        // Allow requests from any origin
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE]);

    let middleware = tower::ServiceBuilder::new()
        .option_layer(host_filter)
        .layer(cors);

    let server = ServerBuilder::new()
        .max_request_body_size(api_config.max_request_body_size)
        .max_response_body_size(api_config.max_response_body_size)
        .max_connections(api_config.max_connections)
        .set_batch_request_config(if api_config.batch_request_limit > 0 {
            BatchRequestConfig::Limit(api_config.batch_request_limit)
        } else {
            BatchRequestConfig::Disabled
        })
        .set_http_middleware(middleware)
        .http_only()
        .build(url)
        .await
        .map_err(|err| ApiError::ServerError(format!("failed to build server: {}", err)))?;
    let local_addr = server
        .local_addr()
        .map_err(|err| ApiError::ServerError(err.to_string()))?;

    let server_handler = server.start(api);
    info!("control API listening on http://{}", local_addr);
    Ok(StopHandle {
        server_handler,
        local_addr,
    })
}

/// Used to be able to stop the API
pub struct StopHandle {
    server_handler: ServerHandle,
    local_addr: SocketAddr,
}

impl StopHandle {
    /// address the API is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// stop the API gracefully
    pub async fn stop(self) {
        match self.server_handler.stop() {
            Ok(_) => {
                info!("API stop signal sent successfully");
            }
            Err(err) => warn!("API already stopped: {:?}", err),
        }
        self.server_handler.stopped().await;
    }
}

#[cfg(test)]
mod tests;
