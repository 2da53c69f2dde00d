// Copyright (c) 2022 MASSA LABS <info@massa.net>

use hyper::client::HttpConnector;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Client, Method, Request, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::{ProcessError, UpcheckConfig, UpcheckReturnType};

/// Probes a managed process over HTTP
#[derive(Debug, Clone)]
pub struct Upchecker {
    cfg: UpcheckConfig,
    client: Client<HttpConnector>,
}

impl Upchecker {
    /// Create a new probe
    pub fn new(cfg: UpcheckConfig) -> Self {
        Upchecker {
            cfg,
            client: Client::new(),
        }
    }

    /// true if the process answered as expected within the probe timeout
    pub async fn probe(&self) -> bool {
        match tokio::time::timeout(self.cfg.timeout.to_duration(), self.request()).await {
            Ok(Ok(up)) => up,
            Ok(Err(err)) => {
                debug!("upcheck {} failed: {}", self.cfg.url, err);
                false
            }
            Err(_) => {
                debug!("upcheck {} timed out", self.cfg.url);
                false
            }
        }
    }

    async fn request(&self) -> Result<bool, ProcessError> {
        let method = Method::from_bytes(self.cfg.method.to_uppercase().as_bytes())
            .map_err(|err| ProcessError::UpcheckError(err.to_string()))?;
        let request = Request::builder()
            .method(method)
            .uri(&self.cfg.url)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(self.cfg.body.clone()))
            .map_err(|err| ProcessError::UpcheckError(err.to_string()))?;
        let response = self
            .client
            .request(request)
            .await
            .map_err(|err| ProcessError::UpcheckError(err.to_string()))?;
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body())
            .await
            .map_err(|err| ProcessError::UpcheckError(err.to_string()))?;
        Ok(is_expected_response(
            self.cfg.return_type,
            &self.cfg.expected,
            status,
            &body,
        ))
    }
}

/// Judge an up-check response
pub(crate) fn is_expected_response(
    return_type: UpcheckReturnType,
    expected: &str,
    status: StatusCode,
    body: &[u8],
) -> bool {
    if !status.is_success() {
        return false;
    }
    match return_type {
        UpcheckReturnType::String => {
            expected.is_empty() || String::from_utf8_lossy(body).trim() == expected
        }
        UpcheckReturnType::RpcResult => {
            let Ok(response) = serde_json::from_slice::<Value>(body) else {
                return false;
            };
            if response.get("error").map_or(false, |err| !err.is_null()) {
                return false;
            }
            match response.get("result") {
                None | Some(Value::Null) => false,
                Some(_) if expected.is_empty() => true,
                Some(Value::String(result)) => result == expected,
                Some(result) => result.to_string() == expected,
            }
        }
    }
}
