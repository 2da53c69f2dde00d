// Copyright (c) 2022 MASSA LABS <info@massa.net>

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use hyper::header::{
    HeaderValue, CONNECTION, SEC_WEBSOCKET_ACCEPT, SEC_WEBSOCKET_KEY, UPGRADE,
};
use hyper::{Body, Request, Response, StatusCode};
use std::borrow::Cow;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::handshake::derive_accept_key;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::{CloseFrame, Role};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, WebSocketStream};
use tracing::{debug, warn};

use crate::server::{text_response, Proxy};
use crate::ProxyError;

fn websocket_key(req: &Request<Body>) -> Option<String> {
    let upgrade = req.headers().get(UPGRADE)?.to_str().ok()?;
    if !upgrade.eq_ignore_ascii_case("websocket") {
        return None;
    }
    let key = req.headers().get(SEC_WEBSOCKET_KEY)?.to_str().ok()?;
    Some(key.to_string())
}

/// Accept the websocket handshake and relay frames in a background task
pub(crate) fn upgrade(proxy: Arc<Proxy>, req: Request<Body>) -> Response<Body> {
    let Some(key) = websocket_key(&req) else {
        return text_response(
            StatusCode::BAD_REQUEST,
            "websocket upgrade expected".to_string(),
        );
    };
    let accept = match HeaderValue::from_str(&derive_accept_key(key.as_bytes())) {
        Ok(accept) => accept,
        Err(err) => {
            return text_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };
    let path = req.uri().path().to_string();
    let upstream_url = proxy.cfg.upstream_url(
        req.uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/"),
    );

    tokio::spawn(async move {
        match hyper::upgrade::on(req).await {
            Ok(upgraded) => {
                let client = WebSocketStream::from_raw_socket(upgraded, Role::Server, None).await;
                relay(proxy, client, path, upstream_url).await;
            }
            Err(err) => warn!("websocket upgrade failed: {}", err),
        }
    });

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::SWITCHING_PROTOCOLS;
    let headers = response.headers_mut();
    headers.insert(CONNECTION, HeaderValue::from_static("upgrade"));
    headers.insert(UPGRADE, HeaderValue::from_static("websocket"));
    headers.insert(SEC_WEBSOCKET_ACCEPT, accept);
    response
}

/// Longest reason a close frame can carry next to its 2-byte code
const MAX_CLOSE_REASON: usize = 123;

/// Cut `reason` to fit a close frame, on a char boundary
fn close_reason(mut reason: String) -> String {
    if reason.len() > MAX_CLOSE_REASON {
        let mut end = MAX_CLOSE_REASON;
        while !reason.is_char_boundary(end) {
            end -= 1;
        }
        reason.truncate(end);
    }
    reason
}

fn close_frame(err: &ProxyError) -> Message {
    Message::Close(Some(CloseFrame {
        code: CloseCode::Error,
        reason: Cow::Owned(close_reason(err.to_string())),
    }))
}

async fn relay<S>(proxy: Arc<Proxy>, client: WebSocketStream<S>, path: String, upstream_url: String)
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    let (mut client_tx, client_rx) = client.split();
    // every frame for the client goes through this channel, so that both
    // directions and the error path can write to it
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();
    let writer = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            let closing = msg.is_close();
            if client_tx.send(msg).await.is_err() || closing {
                break;
            }
        }
        let _ = client_tx.close().await;
    });

    let result = match timeout(
        proxy.cfg.write_timeout.to_duration(),
        connect_async(upstream_url.as_str()),
    )
    .await
    {
        Err(_) => Err(ProxyError::Timeout(format!(
            "connecting to {}",
            upstream_url
        ))),
        Ok(Err(err)) => Err(ProxyError::UpstreamError(err.to_string())),
        Ok(Ok((backend, _))) => {
            debug!("{}: websocket relay to {} open", proxy.cfg.name, upstream_url);
            let (backend_tx, backend_rx) = backend.split();
            tokio::select! {
                res = client_to_backend(&proxy, &path, client_rx, backend_tx) => res,
                res = backend_to_client(backend_rx, out_tx.clone()) => res,
            }
        }
    };
    if let Err(err) = result {
        warn!("{}: websocket relay closed: {}", proxy.cfg.name, err);
        let _ = out_tx.send(close_frame(&err));
    }
    drop(out_tx);
    let _ = writer.await;
}

async fn client_to_backend<R, W>(
    proxy: &Proxy,
    path: &str,
    mut client_rx: R,
    mut backend_tx: W,
) -> Result<(), ProxyError>
where
    R: Stream<Item = Result<Message, WsError>> + Unpin,
    W: Sink<Message, Error = WsError> + Unpin,
{
    while let Some(msg) = client_rx.next().await {
        let msg = msg.map_err(|err| ProxyError::WsError(err.to_string()))?;
        match &msg {
            Message::Text(text) => proxy.gate.admit(path, text.as_bytes()).await?,
            Message::Binary(data) => proxy.gate.admit(path, data).await?,
            _ => {}
        }
        let closing = msg.is_close();
        timeout(proxy.cfg.write_timeout.to_duration(), backend_tx.send(msg))
            .await
            .map_err(|_| ProxyError::Timeout("relaying a frame upstream".to_string()))?
            .map_err(|err| ProxyError::UpstreamError(err.to_string()))?;
        if closing {
            break;
        }
    }
    Ok(())
}

async fn backend_to_client<R>(
    mut backend_rx: R,
    out_tx: mpsc::UnboundedSender<Message>,
) -> Result<(), ProxyError>
where
    R: Stream<Item = Result<Message, WsError>> + Unpin,
{
    while let Some(msg) = backend_rx.next().await {
        let msg = msg.map_err(|err| ProxyError::UpstreamError(err.to_string()))?;
        let closing = msg.is_close();
        if out_tx.send(msg).is_err() || closing {
            break;
        }
    }
    Ok(())
}
