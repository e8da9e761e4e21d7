//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// No response before the configured timeout
    #[error("request timed out")]
    Timeout,

    /// 401 from the backend; the stored token is no longer accepted
    #[error("unauthorized: {}", .message.as_deref().unwrap_or("no message"))]
    Unauthorized { message: Option<String> },

    /// 403 from the backend
    #[error("forbidden: {}", .message.as_deref().unwrap_or("no message"))]
    Forbidden { message: Option<String> },

    /// Any other non-success status
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// Response body did not match the expected shape
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(e)
        }
    }
}

impl ClientError {
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized { message },
            StatusCode::FORBIDDEN => Self::Forbidden { message },
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The backend's own `message` string, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Pulls a `message` string out of an error body, if the body is JSON and has one.
pub(crate) fn message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
