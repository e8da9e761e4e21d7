//! Per-role dashboards: fetch lists, map them to [`Meeting`]s, run actions,
//! and re-fetch everything after each action. Nothing is cached between calls.
//!
//! [`Meeting`]: crate::meetings::Meeting

mod error;
mod forms;
mod mentor;
mod student;

pub use error::{DashboardError, SESSION_EXPIRED_MESSAGE};
pub use forms::{CreateRequestBody, RescheduleBody, RescheduleForm, ScheduleForm};
pub use mentor::{MentorDashboard, MentorLists};
pub use student::{StudentDashboard, StudentLists};

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use reqwest::Method;
use tracing::{info, instrument, warn};

use crate::{
    client::{ClientError, Envelope, PortalClient},
    meetings::Profile,
    navigation::Notice,
};

/// Verb of the cancel endpoints. The backend exposes cancellation as a GET.
pub const CANCEL_METHOD: Method = Method::GET;

/// Result of a successful mutating action: the toast plus freshly fetched lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome<L> {
    pub notice: Notice,
    pub lists: L,
}

/// Cancellation flag for a fetch whose view may go away before it completes.
#[derive(Debug, Clone, Default)]
pub struct DetailsGuard(Arc<AtomicBool>);

impl DetailsGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// On 401 the session is cleared and the error becomes `SessionExpired`;
/// anything else goes through `other`.
pub(crate) fn classify(
    client: &PortalClient,
    err: ClientError,
    other: impl FnOnce(ClientError) -> DashboardError,
) -> DashboardError {
    if err.is_unauthorized() {
        if let Err(e) = client.session().clear_auth() {
            warn!(error = %e, "failed to clear expired session");
        }
        info!("backend rejected token; session cleared");
        DashboardError::SessionExpired
    } else {
        other(err)
    }
}

pub(crate) fn load_error(client: &PortalClient, err: ClientError) -> DashboardError {
    warn!(error = %err, "failed to load meetings");
    classify(client, err, |source| DashboardError::Load {
        what: "Failed to load meetings",
        source,
    })
}

pub(crate) fn action_error(
    client: &PortalClient,
    err: ClientError,
    fallback: &'static str,
) -> DashboardError {
    warn!(error = %err, fallback, "dashboard action failed");
    classify(client, err, |source| DashboardError::Action { fallback, source })
}

/// Success toast: the server's message when it sent one.
pub(crate) fn success_notice(message: Option<String>, fallback: &str) -> Notice {
    Notice::success(message.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.into()))
}

/// GET /modules/profile. `None` when the backend sent no profile.
#[instrument(skip(client))]
pub async fn fetch_profile(client: &PortalClient) -> Result<Option<Profile>, DashboardError> {
    let envelope: Envelope<Profile> = client.get("/modules/profile").await.map_err(|e| {
        classify(client, e, |source| DashboardError::Load {
            what: "Failed to load profile",
            source,
        })
    })?;
    Ok(envelope.into_result())
}
