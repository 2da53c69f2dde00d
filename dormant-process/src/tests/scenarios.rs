// Copyright (c) 2022 MASSA LABS <info@massa.net>

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hyper::StatusCode;

use super::tools::{shell_config, spawn_upcheck_server};
use crate::upcheck::is_expected_response;
use crate::{
    ControlType, ProcessController, ProcessControllerImpl, ProcessError, UpcheckReturnType,
};

#[test]
fn string_upcheck() {
    let ok = StatusCode::OK;
    assert!(is_expected_response(UpcheckReturnType::String, "I'm up!", ok, b"I'm up!\n"));
    assert!(!is_expected_response(UpcheckReturnType::String, "I'm up!", ok, b"starting"));
    assert!(is_expected_response(UpcheckReturnType::String, "", ok, b"anything"));
    assert!(!is_expected_response(
        UpcheckReturnType::String,
        "",
        StatusCode::SERVICE_UNAVAILABLE,
        b""
    ));
}

#[test]
fn rpc_result_upcheck() {
    let ok = StatusCode::OK;
    let block_number = br#"{"jsonrpc":"2.0","id":1,"result":"0x1b4"}"#;
    assert!(is_expected_response(UpcheckReturnType::RpcResult, "", ok, block_number));
    assert!(is_expected_response(UpcheckReturnType::RpcResult, "0x1b4", ok, block_number));
    assert!(!is_expected_response(UpcheckReturnType::RpcResult, "0x0", ok, block_number));
    let rpc_error = br#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"nope"}}"#;
    assert!(!is_expected_response(UpcheckReturnType::RpcResult, "", ok, rpc_error));
    assert!(!is_expected_response(UpcheckReturnType::RpcResult, "", ok, b"I'm up!"));
    let syncing = br#"{"jsonrpc":"2.0","id":1,"result":false}"#;
    assert!(is_expected_response(UpcheckReturnType::RpcResult, "false", ok, syncing));
}

#[test]
fn invalid_configs_are_rejected() {
    let addr = "127.0.0.1:1".parse().unwrap();
    let mut cfg = shell_config(addr, &[], &["true"]);
    assert!(matches!(
        ProcessControllerImpl::new(cfg.clone()),
        Err(ProcessError::InvalidConfig(_))
    ));
    cfg.control_type = ControlType::Docker;
    assert!(matches!(
        ProcessControllerImpl::new(cfg.clone()),
        Err(ProcessError::InvalidConfig(_))
    ));
    cfg.container_id = "tessera-1".into();
    assert!(ProcessControllerImpl::new(cfg).is_ok());
}

#[tokio::test]
async fn start_waits_for_upcheck() {
    let up = Arc::new(AtomicBool::new(true));
    let addr = spawn_upcheck_server(up.clone());
    let controller =
        ProcessControllerImpl::new(shell_config(addr, &["true"], &["true"])).unwrap();

    assert!(!controller.status());
    controller.start().await.unwrap();
    assert!(controller.status());
}

#[tokio::test]
async fn start_fails_when_never_up() {
    let up = Arc::new(AtomicBool::new(false));
    let addr = spawn_upcheck_server(up.clone());
    let controller =
        ProcessControllerImpl::new(shell_config(addr, &["true"], &["true"])).unwrap();

    match controller.start().await {
        Err(ProcessError::StartFailed(name)) => assert_eq!(name, "tessera"),
        other => panic!("unexpected start result: {:?}", other),
    }
    assert!(!controller.status());
}

#[tokio::test]
async fn stop_is_a_no_op_when_cached_down() {
    let up = Arc::new(AtomicBool::new(false));
    let addr = spawn_upcheck_server(up);
    // the stop command would fail if it ran
    let controller =
        ProcessControllerImpl::new(shell_config(addr, &["true"], &["false"])).unwrap();
    controller.stop().await.unwrap();
}

#[tokio::test]
async fn stop_reports_failing_command() {
    let up = Arc::new(AtomicBool::new(true));
    let addr = spawn_upcheck_server(up);
    let controller =
        ProcessControllerImpl::new(shell_config(addr, &["true"], &["false"])).unwrap();
    assert!(controller.is_up().await);

    assert!(matches!(
        controller.stop().await,
        Err(ProcessError::CommandError(_, _))
    ));
    assert!(controller.status());
}

#[tokio::test]
async fn stop_waits_for_down() {
    let up = Arc::new(AtomicBool::new(true));
    let addr = spawn_upcheck_server(up.clone());
    let controller =
        ProcessControllerImpl::new(shell_config(addr, &["true"], &["true"])).unwrap();
    assert!(controller.is_up().await);

    up.store(false, Ordering::SeqCst);
    controller.stop().await.unwrap();
    assert!(!controller.status());
}

#[tokio::test]
async fn stop_fails_when_still_up() {
    let up = Arc::new(AtomicBool::new(true));
    let addr = spawn_upcheck_server(up);
    let controller =
        ProcessControllerImpl::new(shell_config(addr, &["true"], &["true"])).unwrap();
    assert!(controller.is_up().await);

    assert!(matches!(
        controller.stop().await,
        Err(ProcessError::StopFailed(_))
    ));
}
