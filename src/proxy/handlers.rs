use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::{ProxyError, PROXY_PREFIX};
use crate::state::AppState;

/// The only request headers that reach the upstream.
const FORWARDED_HEADERS: [header::HeaderName; 2] = [header::CONTENT_TYPE, header::AUTHORIZATION];

pub fn proxy_routes() -> Router<AppState> {
    Router::new()
        .route("/api/backend/*path", any(forward))
        .layer(DefaultBodyLimit::disable()) // bodies are relayed whole, any size
}

pub fn config_routes() -> Router<AppState> {
    Router::new().route("/api/config", get(public_config))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub google_client_id: Option<String>,
    pub backend_prefix: &'static str,
}

pub async fn public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(PublicConfig {
        google_client_id: state.config.google_client_id.clone(),
        backend_prefix: PROXY_PREFIX,
    })
}

/// ANY /api/backend/*path -> {BACKEND_BASE_URL}/{path}
#[instrument(skip(state, headers, body), fields(%method, path = %uri.path()))]
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let upstream_url = upstream_url(&state.config.backend_base_url, &uri)?;

    let mut request = state
        .http
        .request(method.clone(), &upstream_url)
        .headers(forwarded_headers(&headers));

    if carries_body(&method) {
        request = request.body(body);
    }

    let upstream = request.send().await.map_err(|e| {
        if e.is_timeout() {
            warn!(url = %upstream_url, "upstream timed out");
            ProxyError::Timeout(state.config.upstream_timeout_secs)
        } else {
            warn!(url = %upstream_url, error = %e, "upstream unreachable");
            ProxyError::Unreachable(e)
        }
    })?;

    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let body = upstream.bytes().await.map_err(|e| {
        if e.is_timeout() {
            ProxyError::Timeout(state.config.upstream_timeout_secs)
        } else {
            ProxyError::Body(e)
        }
    })?;

    debug!(%status, bytes = body.len(), "upstream responded");
    Ok((status, [(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// Builds the upstream URL from the raw request path, so percent-encoding
/// survives untouched. The query string is carried over when present.
pub(crate) fn upstream_url(base: &str, uri: &Uri) -> Result<String, ProxyError> {
    let rest = uri
        .path()
        .strip_prefix(PROXY_PREFIX)
        .and_then(|p| p.strip_prefix('/'))
        .ok_or(ProxyError::BadPath(PROXY_PREFIX))?;

    let mut url = format!("{}/{}", base.trim_end_matches('/'), rest);
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }
    Ok(url)
}

pub(crate) fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in FORWARDED_HEADERS {
        if let Some(value) = inbound.get(&name) {
            out.insert(name, value.clone());
        }
    }
    out
}

fn carries_body(method: &Method) -> bool {
    method != Method::GET && method != Method::HEAD
}
