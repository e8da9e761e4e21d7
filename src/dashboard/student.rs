use reqwest::Method;
use tracing::{debug, info, instrument};

use super::{
    action_error, classify, load_error, success_notice, ActionOutcome, DashboardError,
    DetailsGuard, RescheduleForm, ScheduleForm, CANCEL_METHOD,
};
use crate::{
    auth::{require_session, Role, Session},
    client::{Envelope, PortalClient},
    meetings::{HistoryItem, Meeting, MeetingDetails, MeetingRequest, UpcomingMeeting},
    navigation::{Navigation, Notice},
};

const UPCOMING_PATH: &str = "/modules/user/meetings/upcomming";
const REQUESTS_PATH: &str = "/modules/user/requests";
const HISTORY_PATH: &str = "/modules/user/history";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentLists {
    pub upcoming: Vec<Meeting>,
    pub requests: Vec<Meeting>,
    pub history: Vec<Meeting>,
}

impl StudentLists {
    pub fn find(&self, id: &str) -> Option<&Meeting> {
        self.upcoming
            .iter()
            .chain(&self.requests)
            .chain(&self.history)
            .find(|m| m.id == id)
    }
}

pub struct StudentDashboard {
    client: PortalClient,
}

impl StudentDashboard {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }

    /// Opens the dashboard only for a stored student session.
    pub fn open(client: PortalClient) -> Result<(Self, Session), Navigation> {
        let session = require_session(client.session(), Role::Student)?;
        Ok((Self::new(client), session))
    }

    /// Fetches all three lists at once; the first failure ends the join.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<StudentLists, DashboardError> {
        let (upcoming, requests, history) = tokio::try_join!(
            self.client.get::<Envelope<Vec<UpcomingMeeting>>>(UPCOMING_PATH),
            self.client.get::<Envelope<Vec<MeetingRequest>>>(REQUESTS_PATH),
            self.client.get::<Envelope<Vec<HistoryItem>>>(HISTORY_PATH),
        )
        .map_err(|e| load_error(&self.client, e))?;

        let lists = StudentLists {
            upcoming: upcoming
                .into_result_or_default()
                .into_iter()
                .map(Meeting::from_upcoming)
                .collect(),
            requests: requests
                .into_result_or_default()
                .into_iter()
                .map(Meeting::from_request)
                .collect(),
            history: history
                .into_result_or_default()
                .into_iter()
                .map(Meeting::from_history)
                .collect(),
        };
        debug!(
            upcoming = lists.upcoming.len(),
            requests = lists.requests.len(),
            history = lists.history.len(),
            "student lists loaded"
        );
        Ok(lists)
    }

    #[instrument(skip(self, form))]
    pub async fn create_request(
        &self,
        form: &ScheduleForm,
    ) -> Result<ActionOutcome<StudentLists>, DashboardError> {
        let body = form.to_body()?;
        self.client
            .act(Method::POST, REQUESTS_PATH, Some(&body))
            .await
            .map_err(|e| action_error(&self.client, e, "Failed to create mentorship request"))?;
        info!("mentorship request created");

        Ok(ActionOutcome {
            notice: Notice::success("Mentorship request created successfully"),
            lists: self.load().await?,
        })
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: &str) -> Result<ActionOutcome<StudentLists>, DashboardError> {
        let message = self
            .client
            .act::<()>(
                CANCEL_METHOD,
                &format!("/modules/user/meetings/{}/cancel", urlencoding::encode(id)),
                None,
            )
            .await
            .map_err(|e| action_error(&self.client, e, "Failed to cancel meeting request"))?;
        info!(meeting_id = id, "meeting cancelled");

        Ok(ActionOutcome {
            notice: success_notice(message, "Meeting request cancelled"),
            lists: self.load().await?,
        })
    }

    /// Form pre-filled from the meeting's current values, converted for input controls.
    pub fn reschedule_form(
        &self,
        lists: &StudentLists,
        id: &str,
    ) -> Result<RescheduleForm, DashboardError> {
        lists
            .find(id)
            .map(RescheduleForm::from_meeting)
            .ok_or_else(|| DashboardError::UnknownMeeting(id.to_string()))
    }

    #[instrument(skip(self, form))]
    pub async fn reschedule(
        &self,
        id: &str,
        form: &RescheduleForm,
    ) -> Result<ActionOutcome<StudentLists>, DashboardError> {
        let body = form.to_body()?;
        let path = format!("/modules/user/meetings/{}/reschedule", urlencoding::encode(id));
        let message = self
            .client
            .act(Method::POST, &path, Some(&body))
            .await
            .map_err(|e| action_error(&self.client, e, "Failed to reschedule meeting request"))?;
        info!(meeting_id = id, "meeting rescheduled");

        Ok(ActionOutcome {
            notice: success_notice(message, "Meeting request has been rescheduled."),
            lists: self.load().await?,
        })
    }

    /// Loads one meeting's details. `Ok(None)` when the guard was cancelled
    /// while the request was in flight, or when the backend sent no payload.
    #[instrument(skip(self, guard))]
    pub async fn meeting_details(
        &self,
        id: &str,
        guard: &DetailsGuard,
    ) -> Result<Option<MeetingDetails>, DashboardError> {
        let envelope: Envelope<MeetingDetails> = self
            .client
            .get(&format!("/modules/user/meetings/{}", urlencoding::encode(id)))
            .await
            .map_err(|e| {
                classify(&self.client, e, |source| DashboardError::Load {
                    what: "Failed to load meeting details",
                    source,
                })
            })?;

        if guard.is_cancelled() {
            debug!(meeting_id = id, "details view closed; dropping response");
            return Ok(None);
        }
        Ok(envelope.into_result())
    }
}
