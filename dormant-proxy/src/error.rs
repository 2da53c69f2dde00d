// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use thiserror::Error;

/// Errors of the proxies
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum ProxyError {
    /// node is busy: {0}
    NodeBusy(String),
    /// could not wake the node up: {0}
    WakeUpFailed(String),
    /// nodes of the private transaction participants are not ready
    PrivateTxNotReady,
    /// private transaction coordination failed: {0}
    PrivateTxError(String),
    /// upstream error: {0}
    UpstreamError(String),
    /// timeout {0}
    Timeout(String),
    /// could not read the request body: {0}
    BodyError(String),
    /// websocket error: {0}
    WsError(String),
    /// could not bind {0}
    BindError(String),
    /// invalid proxy configuration: {0}
    InvalidConfig(String),
}
