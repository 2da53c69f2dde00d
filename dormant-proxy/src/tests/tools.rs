// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_control_exports::MockNodeControlController;
use dormant_time::DormantTime;
use futures_util::{SinkExt, StreamExt};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{ProxyConfig, ProxyKind};

/// HTTP upstream describing what it received. Returns its address and a hit counter.
pub fn http_upstream() -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let server = hyper::Server::bind(&"127.0.0.1:0".parse().unwrap()).serve(make_service_fn(
        move |_| {
            let counter = counter.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        let head = format!(
                            "{} {}",
                            req.method(),
                            req.uri().path_and_query().unwrap()
                        );
                        let body = hyper::body::to_bytes(req.into_body()).await.unwrap();
                        Ok::<_, Infallible>(Response::new(Body::from(format!(
                            "{}: {}",
                            head,
                            String::from_utf8_lossy(&body)
                        ))))
                    }
                }))
            }
        },
    ));
    let addr = server.local_addr();
    tokio::spawn(server);
    (addr, hits)
}

/// Websocket upstream echoing every frame
pub async fn ws_echo_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
                while let Some(Ok(msg)) = ws.next().await {
                    if msg.is_text() || msg.is_binary() {
                        if ws.send(msg).await.is_err() {
                            break;
                        }
                    }
                }
            });
        }
    });
    addr
}

pub fn proxy_config(kind: ProxyKind, upstream_addr: String) -> ProxyConfig {
    ProxyConfig {
        name: format!("{}-test", kind),
        kind,
        proxy_addr: "127.0.0.1:0".parse().unwrap(),
        upstream_addr,
        proxy_paths: vec!["/".to_string()],
        ignore_paths_for_activity: vec!["/upcheck".to_string(), "/partyinfo".to_string()],
        read_timeout: DormantTime::from_secs(5),
        write_timeout: DormantTime::from_secs(5),
    }
}

/// Controller of a node that is up, checked `times` times
pub fn awake_controller(times: usize) -> MockNodeControlController {
    let mut controller = MockNodeControlController::new();
    controller
        .expect_reset_inactivity()
        .times(times)
        .return_const(());
    controller
        .expect_is_node_busy()
        .times(times)
        .returning(|| Ok(()));
    controller
        .expect_prepare_node()
        .times(times)
        .returning(|| Ok(()));
    controller
}

/// Controller that must not be consulted at all
pub fn untouched_controller() -> MockNodeControlController {
    let mut controller = MockNodeControlController::new();
    controller.expect_reset_inactivity().never();
    controller.expect_is_node_busy().never();
    controller.expect_prepare_node().never();
    controller
}
