use crate::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .build()?;

        Ok(Self::from_parts(Arc::new(config), http))
    }

    pub fn from_parts(config: Arc<AppConfig>, http: reqwest::Client) -> Self {
        Self { config, http }
    }
}
