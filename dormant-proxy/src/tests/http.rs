// Copyright (c) 2022 MASSA LABS <info@massa.net>

use dormant_control_exports::{MockNodeControlController, NodeControlError};
use dormant_models::NodeState;
use hyper::{Body, Client, Request, StatusCode};
use std::sync::atomic::Ordering;

use super::tools::*;
use crate::{start_proxy, ProxyError, ProxyKind};

const PRIVATE_TX: &str = r#"{"jsonrpc":"2.0","id":1,"method":"eth_sendTransaction","params":[{"from":"0xed9d","privateFor":["key2=","key3="]}]}"#;

async fn send(addr: std::net::SocketAddr, path: &str, body: &str) -> (StatusCode, String) {
    let req = Request::post(format!("http://{}{}", addr, path))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = Client::new().request(req).await.unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn request_is_relayed_and_counts_as_activity() {
    let (upstream, hits) = http_upstream();
    let proxy = start_proxy(
        proxy_config(ProxyKind::Http, format!("http://{}", upstream)),
        Box::new(awake_controller(1)),
    )
    .await
    .unwrap();

    let (status, body) = send(proxy.local_addr(), "/rpc?verbose=1", r#"{"method":"eth_blockNumber"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"POST /rpc?verbose=1: {"method":"eth_blockNumber"}"#);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    proxy.stop().await;
}

#[tokio::test]
async fn allowlisted_path_does_not_wake_the_node() {
    let (upstream, hits) = http_upstream();
    let proxy = start_proxy(
        proxy_config(ProxyKind::Http, format!("http://{}", upstream)),
        Box::new(untouched_controller()),
    )
    .await
    .unwrap();

    let (status, _) = send(proxy.local_addr(), "/upcheck", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    proxy.stop().await;
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (upstream, hits) = http_upstream();
    let mut cfg = proxy_config(ProxyKind::Http, format!("http://{}", upstream));
    cfg.proxy_paths = vec!["/rpc".to_string()];
    let proxy = start_proxy(cfg, Box::new(untouched_controller()))
        .await
        .unwrap();

    let (status, _) = send(proxy.local_addr(), "/admin", "{}").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    proxy.stop().await;
}

#[tokio::test]
async fn busy_node_fails_the_request() {
    let (upstream, hits) = http_upstream();
    let mut controller = MockNodeControlController::new();
    controller.expect_reset_inactivity().return_const(());
    controller
        .expect_is_node_busy()
        .returning(|| Err(NodeControlError::Busy(NodeState::ShutdownInprogress)));
    controller.expect_prepare_node().never();
    let proxy = start_proxy(
        proxy_config(ProxyKind::Http, format!("http://{}", upstream)),
        Box::new(controller),
    )
    .await
    .unwrap();

    let (status, body) = send(proxy.local_addr(), "/", "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("busy"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    proxy.stop().await;
}

#[tokio::test]
async fn private_tx_with_a_sleeping_participant_is_not_relayed() {
    let (upstream, hits) = http_upstream();
    let mut controller = awake_controller(1);
    controller
        .expect_validate_private_tx_participants()
        .withf(|keys| keys == &vec!["key2=".to_string(), "key3=".to_string()])
        .times(1)
        .returning(|_| Ok(false));
    let proxy = start_proxy(
        proxy_config(ProxyKind::Http, format!("http://{}", upstream)),
        Box::new(controller),
    )
    .await
    .unwrap();

    let (status, body) = send(proxy.local_addr(), "/", PRIVATE_TX).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, ProxyError::PrivateTxNotReady.to_string());
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    proxy.stop().await;
}

#[tokio::test]
async fn private_tx_with_ready_participants_is_relayed() {
    let (upstream, hits) = http_upstream();
    let mut controller = awake_controller(1);
    controller
        .expect_validate_private_tx_participants()
        .times(1)
        .returning(|_| Ok(true));
    let proxy = start_proxy(
        proxy_config(ProxyKind::Http, format!("http://{}", upstream)),
        Box::new(controller),
    )
    .await
    .unwrap();

    let (status, _) = send(proxy.local_addr(), "/", PRIVATE_TX).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    proxy.stop().await;
}

#[tokio::test]
async fn unreachable_upstream_is_a_server_error() {
    let proxy = start_proxy(
        proxy_config(ProxyKind::Http, "http://127.0.0.1:1".to_string()),
        Box::new(awake_controller(1)),
    )
    .await
    .unwrap();

    let (status, body) = send(proxy.local_addr(), "/", "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("upstream error"));

    proxy.stop().await;
}

#[tokio::test]
async fn mismatched_upstream_scheme_is_rejected() {
    let result = start_proxy(
        proxy_config(ProxyKind::Ws, "http://127.0.0.1:8546".to_string()),
        Box::new(untouched_controller()),
    )
    .await;
    assert!(matches!(result, Err(ProxyError::InvalidConfig(_))));
}
