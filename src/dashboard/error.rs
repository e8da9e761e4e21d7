use thiserror::Error;

use crate::{
    client::ClientError,
    meetings::format::FormatError,
    navigation::{Navigation, Notice},
};

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

#[derive(Debug, Error)]
pub enum DashboardError {
    /// 401 from the backend. The session has already been cleared.
    #[error("session expired")]
    SessionExpired,

    /// A read failed for any reason other than 401.
    #[error("{what}: {source}")]
    Load {
        what: &'static str,
        #[source]
        source: ClientError,
    },

    /// A create/cancel/reschedule failed for any reason other than 401.
    #[error("{fallback}: {source}")]
    Action {
        fallback: &'static str,
        #[source]
        source: ClientError,
    },

    /// User input could not be converted to the wire format; nothing was sent.
    #[error(transparent)]
    InvalidInput(#[from] FormatError),

    #[error("meeting {0} is not in any list")]
    UnknownMeeting(String),
}

impl DashboardError {
    /// Where the view should go after this error, if anywhere.
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::SessionExpired => Some(Navigation::Login),
            _ => None,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            Self::SessionExpired => Notice::error(SESSION_EXPIRED_MESSAGE),
            Self::Load { what, .. } => Notice::error(*what),
            Self::Action { fallback, source } => {
                Notice::error(source.server_message().unwrap_or(*fallback))
            }
            Self::InvalidInput(e) => Notice::error(e.to_string()),
            Self::UnknownMeeting(_) => Notice::error("Meeting not found"),
        }
    }
}
