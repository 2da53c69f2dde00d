// Copyright (c) 2022 MASSA LABS <info@massa.net>

use hyper::body::{to_bytes, Bytes};
use hyper::header::{CONTENT_LENGTH, HOST, TRANSFER_ENCODING};
use hyper::{Body, Request, Response, Uri};
use std::future::Future;
use tokio::time::timeout;

use crate::server::{error_response, Proxy};
use crate::ProxyError;
use dormant_time::DormantTime;

async fn read_body(span: DormantTime, body: Body, what: &str) -> Result<Bytes, ProxyError> {
    within(span, to_bytes(body), what)
        .await?
        .map_err(|err| ProxyError::BodyError(err.to_string()))
}

async fn within<F: Future>(span: DormantTime, fut: F, what: &str) -> Result<F::Output, ProxyError> {
    timeout(span.to_duration(), fut)
        .await
        .map_err(|_| ProxyError::Timeout(format!("{} after {}ms", what, span.to_millis())))
}

/// Relay one request upstream once the gate lets it through
pub(crate) async fn relay(proxy: &Proxy, req: Request<Body>) -> Response<Body> {
    match forward(proxy, req).await {
        Ok(response) => response,
        Err(err) => error_response(&proxy.cfg.name, &err),
    }
}

async fn forward(proxy: &Proxy, req: Request<Body>) -> Result<Response<Body>, ProxyError> {
    let (parts, body) = req.into_parts();
    let body = read_body(proxy.cfg.read_timeout, body, "reading the request").await?;
    proxy.gate.admit(parts.uri.path(), &body).await?;

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let uri: Uri = proxy
        .cfg
        .upstream_url(path_and_query)
        .parse()
        .map_err(|err| ProxyError::UpstreamError(format!("invalid upstream uri: {}", err)))?;
    let mut builder = Request::builder().method(parts.method).uri(uri);
    for (name, value) in parts.headers.iter() {
        if name != HOST {
            builder = builder.header(name, value);
        }
    }
    let upstream_req = builder
        .body(Body::from(body))
        .map_err(|err| ProxyError::UpstreamError(err.to_string()))?;

    let response = within(
        proxy.cfg.write_timeout,
        proxy.client.request(upstream_req),
        "waiting for the upstream",
    )
    .await?
    .map_err(|err| ProxyError::UpstreamError(err.to_string()))?;

    let (mut parts, body) = response.into_parts();
    let body = read_body(proxy.cfg.read_timeout, body, "reading the upstream response").await?;
    // the body is relayed in one piece, hyper sets the length again
    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.remove(TRANSFER_ENCODING);
    Ok(Response::from_parts(parts, Body::from(body)))
}
