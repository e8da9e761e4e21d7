//! HTTP client for the backend, reached through the same-origin proxy.
//!
//! Every request picks up the bearer token from the [`SessionStore`] at the
//! moment it is built; callers never set `Authorization` themselves.

mod envelope;
pub mod error;

pub use envelope::Envelope;
pub use error::ClientError;

use std::time::Duration;

use reqwest::{header, Client, ClientBuilder, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use crate::session::SessionStore;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct PortalClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl PortalClient {
    /// Client with default settings and an empty in-memory session.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> PortalClientBuilder {
        PortalClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Request builder with the JSON content type and, when a session
    /// exists, the bearer token.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        let mut request = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = self.session.auth_token() {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Sends the request and returns the raw body of a 2xx response.
    async fn read(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            debug!(%status, "backend returned error status");
            Err(ClientError::from_status(status, error::message_from_body(&body)))
        }
    }

    /// Sends the request and decodes a successful JSON body into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let body = self.read(request).await?;
        let raw = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(raw).map_err(|e| {
            warn!(error = %e, "response did not match expected shape");
            ClientError::Decode(e)
        })
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    #[instrument(skip(self, body), level = "debug")]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    #[instrument(skip(self, body), level = "debug")]
    pub async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }

    /// Mutation whose success body is only read for its `message`. Any 2xx is
    /// a success, whatever the body looks like.
    #[instrument(skip(self, body), level = "debug")]
    pub async fn act<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<String>, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        let body = self.read(request).await?;
        Ok(error::message_from_body(&body))
    }
}

#[derive(Default)]
pub struct PortalClientBuilder {
    base_url: Option<String>,
    session: Option<SessionStore>,
    timeout: Option<Duration>,
}

impl PortalClientBuilder {
    /// Base URL of the proxy, e.g. `http://localhost:8080/api/backend`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<PortalClient, ClientError> {
        let base_url = self
            .base_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(concat!("mentor-portal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(PortalClient {
            client,
            base_url,
            session: self.session.unwrap_or_else(SessionStore::in_memory),
        })
    }
}
