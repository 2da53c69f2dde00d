// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_control_exports::NodeControlController;
use hyper::client::HttpConnector;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Client, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::gate::ActivityGate;
use crate::{http, ws, ProxyConfig, ProxyError, ProxyKind};

pub(crate) struct Proxy {
    pub cfg: ProxyConfig,
    pub gate: ActivityGate,
    pub client: Client<HttpConnector>,
}

impl Proxy {
    async fn handle(self: Arc<Self>, req: Request<Body>) -> Response<Body> {
        let path = req.uri().path();
        if !self.cfg.is_proxied(path) {
            debug!("{}: no route for {}", self.cfg.name, path);
            return text_response(StatusCode::NOT_FOUND, "not found".to_string());
        }
        match self.cfg.kind {
            ProxyKind::Http => http::relay(&self, req).await,
            ProxyKind::Ws => ws::upgrade(self.clone(), req),
        }
    }
}

pub(crate) fn text_response(status: StatusCode, text: String) -> Response<Body> {
    let mut response = Response::new(Body::from(text));
    *response.status_mut() = status;
    response
}

pub(crate) fn error_response(name: &str, err: &ProxyError) -> Response<Body> {
    warn!("{}: request rejected: {}", name, err);
    text_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// Start a proxy listener
///
/// # Arguments
/// * `cfg`: proxy settings
/// * `controller`: link to the node control worker
pub async fn start_proxy(
    cfg: ProxyConfig,
    controller: Box<dyn NodeControlController>,
) -> Result<ProxyStopHandle, ProxyError> {
    cfg.check()?;
    let builder = hyper::Server::try_bind(&cfg.proxy_addr)
        .map_err(|err| ProxyError::BindError(format!("{}: {}", cfg.proxy_addr, err)))?;
    let name = cfg.name.clone();
    let kind = cfg.kind;
    let proxy = Arc::new(Proxy {
        gate: ActivityGate::new(controller, cfg.ignore_paths_for_activity.clone()),
        client: Client::new(),
        cfg,
    });

    let server = builder.serve(make_service_fn(move |_| {
        let proxy = proxy.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let proxy = proxy.clone();
                async move { Ok::<_, Infallible>(proxy.handle(req).await) }
            }))
        }
    }));
    let local_addr = server.local_addr();
    let (stopper, stop_rx) = oneshot::channel::<()>();
    let graceful_server = server.with_graceful_shutdown(async {
        stop_rx.await.ok();
    });
    let server_name = name.clone();
    let join_handle = tokio::spawn(async move {
        if let Err(err) = graceful_server.await {
            error!("{} proxy server error: {}", server_name, err);
        }
    });
    info!("{} proxy {} listening on {}", kind, name, local_addr);

    Ok(ProxyStopHandle {
        name,
        local_addr,
        stopper,
        join_handle,
    })
}

/// Used to stop a proxy listener
pub struct ProxyStopHandle {
    name: String,
    local_addr: SocketAddr,
    stopper: oneshot::Sender<()>,
    join_handle: JoinHandle<()>,
}

impl ProxyStopHandle {
    /// address the proxy listens on
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// stop accepting connections and wait for the pending requests
    pub async fn stop(self) {
        let _ = self.stopper.send(());
        if let Err(err) = self.join_handle.await {
            warn!("{} proxy task failed: {}", self.name, err);
        }
        info!("{} proxy stopped", self.name);
    }
}
