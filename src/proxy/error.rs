use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures of the relay itself. Upstream error statuses are not errors here;
/// they are mirrored back unchanged.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream did not answer within {0} seconds")]
    Timeout(u64),

    #[error("upstream unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("failed to read upstream response: {0}")]
    Body(#[source] reqwest::Error),

    #[error("request path is outside {0}")]
    BadPath(&'static str),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ProxyError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout"),
            ProxyError::Unreachable(_) => (StatusCode::BAD_GATEWAY, "upstream_unreachable"),
            ProxyError::Body(_) => (StatusCode::BAD_GATEWAY, "upstream_body"),
            ProxyError::BadPath(_) => (StatusCode::NOT_FOUND, "not_found"),
        };
        let body = ErrorBody {
            error,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let res = ProxyError::Timeout(30).into_response();
        assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn bad_path_is_not_found() {
        let res = ProxyError::BadPath("/api/backend").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
