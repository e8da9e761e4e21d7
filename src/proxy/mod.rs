use crate::state::AppState;
use axum::Router;

mod error;
pub mod handlers;

pub use error::ProxyError;

/// Mount point of the same-origin relay.
pub const PROXY_PREFIX: &str = "/api/backend";

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::proxy_routes())
        .merge(handlers::config_routes())
}
