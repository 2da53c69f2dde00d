// Copyright (c) 2022 MASSA LABS <info@massa.net>

use displaydoc::Display;
use jsonrpsee::types::{ErrorObject, ErrorObjectOwned};

/// Errors of the api component.
#[non_exhaustive]
#[derive(Display, thiserror::Error, Debug)]
pub enum ApiError {
    /// Bad request: {0}
    BadRequest(String),
    /// Node control error: {0}
    NodeControlError(String),
    /// Server error: {0}
    ServerError(String),
}

impl From<ApiError> for ErrorObjectOwned {
    fn from(err: ApiError) -> Self {
        // JSON-RPC Server errors codes must be between -32099 to -32000
        let code = match err {
            ApiError::BadRequest(_) => -32000,
            ApiError::NodeControlError(_) => -32001,
            ApiError::ServerError(_) => -32002,
        };

        ErrorObject::owned(code, err.to_string(), None::<()>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_stay_in_the_server_range() {
        let obj: ErrorObjectOwned = ApiError::NodeControlError("node is busy".into()).into();
        assert_eq!(obj.code(), -32001);
        assert_eq!(obj.message(), "Node control error: node is busy");
    }
}
