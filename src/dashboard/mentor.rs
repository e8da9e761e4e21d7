use tracing::{debug, info, instrument};

use super::{
    action_error, load_error, success_notice, ActionOutcome, DashboardError, CANCEL_METHOD,
};
use crate::{
    auth::{require_session, Role, Session},
    client::{Envelope, PortalClient},
    meetings::{HistoryItem, Meeting, UpcomingMeeting},
    navigation::Navigation,
};

const UPCOMING_PATH: &str = "/modules/mentor/meetings/upcomming";
const HISTORY_PATH: &str = "/modules/mentor/history";

/// Mentor lists. Every entry carries its student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorLists {
    pub upcoming: Vec<Meeting>,
    pub history: Vec<Meeting>,
}

pub struct MentorDashboard {
    client: PortalClient,
}

impl MentorDashboard {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }

    pub fn open(client: PortalClient) -> Result<(Self, Session), Navigation> {
        let session = require_session(client.session(), Role::Mentor)?;
        Ok((Self::new(client), session))
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<MentorLists, DashboardError> {
        let (upcoming, history) = tokio::try_join!(
            self.client.get::<Envelope<Vec<UpcomingMeeting>>>(UPCOMING_PATH),
            self.client.get::<Envelope<Vec<HistoryItem>>>(HISTORY_PATH),
        )
        .map_err(|e| load_error(&self.client, e))?;

        let lists = MentorLists {
            upcoming: upcoming
                .into_result_or_default()
                .into_iter()
                .map(Meeting::mentor_from_upcoming)
                .collect(),
            history: history
                .into_result_or_default()
                .into_iter()
                .map(Meeting::mentor_from_history)
                .collect(),
        };
        debug!(
            upcoming = lists.upcoming.len(),
            history = lists.history.len(),
            "mentor lists loaded"
        );
        Ok(lists)
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: &str) -> Result<ActionOutcome<MentorLists>, DashboardError> {
        let message = self
            .client
            .act::<()>(
                CANCEL_METHOD,
                &format!("/modules/mentor/meetings/{}/cancel", urlencoding::encode(id)),
                None,
            )
            .await
            .map_err(|e| action_error(&self.client, e, "Failed to cancel meeting request"))?;
        info!(meeting_id = id, "meeting cancelled by mentor");

        Ok(ActionOutcome {
            notice: success_notice(message, "Meeting request cancelled"),
            lists: self.load().await?,
        })
    }
}
