use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BACKEND_BASE_URL: &str =
    "https://admin.sunyaiashindi.com/api/v1/mentorship-portal";

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub backend_base_url: String,
    pub google_client_id: Option<String>,
    pub upstream_timeout_secs: u64,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_base_url = std::env::var("BACKEND_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_BASE_URL.into());
        let google_client_id = std::env::var("GOOGLE_CLIENT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let upstream_timeout_secs = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);
        let server = ServerConfig {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
        };
        Ok(Self::new(
            backend_base_url,
            google_client_id,
            upstream_timeout_secs,
            server,
        ))
    }

    pub fn new(
        backend_base_url: impl Into<String>,
        google_client_id: Option<String>,
        upstream_timeout_secs: u64,
        server: ServerConfig,
    ) -> Self {
        let backend_base_url = backend_base_url.into().trim_end_matches('/').to_string();
        Self {
            backend_base_url,
            google_client_id,
            upstream_timeout_secs,
            server,
        }
    }

    /// Config pointing at an arbitrary upstream, used by tests and local tooling.
    pub fn for_upstream(backend_base_url: impl Into<String>) -> Self {
        Self::new(
            backend_base_url,
            None,
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
            ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
        )
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
