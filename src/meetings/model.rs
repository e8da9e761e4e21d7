use serde::{Deserialize, Serialize};

use super::MeetingStatus;

/// Student attached to a meeting, shown on mentor screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
}

/// Uniform display model, re-derived from backend payloads on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub topic: String,
    pub details: String,
    pub preferred_date: String,
    pub preferred_start_time: String,
    pub preferred_end_time: Option<String>,
    pub status: MeetingStatus,
    pub meet_link: Option<String>,
    pub meeting_start: Option<String>,
    pub meeting_end: Option<String>,
    pub updated_at: Option<String>,
    pub student: Option<Participant>,
}

// --- backend payloads ---

#[derive(Debug, Clone, Deserialize)]
pub struct BackendParticipant {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A mentorship request as listed by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequest {
    pub id: String,
    #[serde(default)]
    pub preferred_date: String,
    #[serde(default)]
    pub preferred_start_time: String,
    pub preferred_end_time: Option<String>,
    #[serde(default)]
    pub status: String,
    pub updated_at: Option<String>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub user: Option<BackendParticipant>,
}

/// Realized meeting attached to a history item or a details payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInfo {
    pub meeting_summary: Option<String>,
    pub meeting_description: Option<String>,
    pub meeting_start: Option<String>,
    pub meeting_end: Option<String>,
    pub meet_link: Option<String>,
    pub mentor: Option<MentorInfo>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MentorInfo {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingMeeting {
    pub id: String,
    pub request: Option<MeetingRequest>,
    pub meeting_summary: Option<String>,
    pub meeting_description: Option<String>,
    pub meeting_start: Option<String>,
    pub meeting_end: Option<String>,
    pub meet_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryItem {
    #[serde(flatten)]
    pub request: MeetingRequest,
    pub meeting: Option<MeetingInfo>,
}

/// Payload of `/modules/user/meetings/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDetails {
    pub id: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub admin_notes: Option<String>,
    pub meeting: Option<MeetingInfo>,
}

impl MeetingDetails {
    pub fn status(&self) -> MeetingStatus {
        MeetingStatus::from_backend(&self.status)
    }

    /// Admin notes worth showing; the backend sometimes sends the string "null".
    pub fn admin_notes(&self) -> Option<&str> {
        self.admin_notes
            .as_deref()
            .filter(|n| !n.is_empty() && *n != "null")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl Profile {
    /// Fallback avatar letter.
    pub fn initial(&self) -> char {
        self.name
            .trim()
            .chars()
            .next()
            .unwrap_or('U')
            .to_ascii_uppercase()
    }
}

// --- mapping ---

fn participant(p: Option<&BackendParticipant>) -> Participant {
    Participant {
        name: p
            .and_then(|p| p.name.clone())
            .unwrap_or_else(|| "Student".into()),
        email: p.and_then(|p| p.email.clone()).unwrap_or_default(),
    }
}

impl Meeting {
    pub fn from_upcoming(m: UpcomingMeeting) -> Self {
        let req = m.request;
        let r = req.as_ref();
        Self {
            id: r.map(|r| r.id.clone()).unwrap_or(m.id),
            topic: r
                .and_then(|r| r.topic.clone())
                .or(m.meeting_summary)
                .unwrap_or_else(|| "Upcoming Meeting".into()),
            details: r
                .and_then(|r| r.description.clone())
                .or(m.meeting_description)
                .unwrap_or_default(),
            preferred_date: r.map(|r| r.preferred_date.clone()).unwrap_or_default(),
            preferred_start_time: r
                .map(|r| r.preferred_start_time.clone())
                .unwrap_or_default(),
            preferred_end_time: r.and_then(|r| r.preferred_end_time.clone()),
            status: MeetingStatus::from_backend(r.map(|r| r.status.as_str()).unwrap_or_default()),
            meet_link: m.meet_link,
            meeting_start: m.meeting_start,
            meeting_end: m.meeting_end,
            updated_at: r.and_then(|r| r.updated_at.clone()),
            student: None,
        }
    }

    pub fn from_request(r: MeetingRequest) -> Self {
        Self {
            status: MeetingStatus::from_backend(&r.status),
            details: r
                .description
                .unwrap_or_else(|| format!("Status: {}", r.status)),
            topic: r.topic.unwrap_or_else(|| "Mentorship Request".into()),
            id: r.id,
            preferred_date: r.preferred_date,
            preferred_start_time: r.preferred_start_time,
            preferred_end_time: r.preferred_end_time,
            meet_link: None,
            meeting_start: None,
            meeting_end: None,
            updated_at: r.updated_at,
            student: None,
        }
    }

    pub fn from_history(h: HistoryItem) -> Self {
        let HistoryItem { request: r, meeting } = h;
        let info = meeting.as_ref();
        Self {
            status: MeetingStatus::from_backend(&r.status),
            topic: r
                .topic
                .or_else(|| info.and_then(|i| i.meeting_summary.clone()))
                .unwrap_or_else(|| "Meeting".into()),
            details: r
                .description
                .or_else(|| info.and_then(|i| i.meeting_description.clone()))
                .unwrap_or_default(),
            id: r.id,
            preferred_date: r.preferred_date,
            preferred_start_time: r.preferred_start_time,
            preferred_end_time: r.preferred_end_time,
            meet_link: info.and_then(|i| i.meet_link.clone()),
            meeting_start: info.and_then(|i| i.meeting_start.clone()),
            meeting_end: info.and_then(|i| i.meeting_end.clone()),
            updated_at: r.updated_at,
            student: None,
        }
    }

    /// Mentor view of an upcoming meeting: the student comes from the request.
    pub fn mentor_from_upcoming(m: UpcomingMeeting) -> Self {
        let student = participant(m.request.as_ref().and_then(|r| r.user.as_ref()));
        Self {
            student: Some(student),
            ..Self::from_upcoming(m)
        }
    }

    pub fn mentor_from_history(h: HistoryItem) -> Self {
        let student = participant(h.request.user.as_ref());
        Self {
            student: Some(student),
            ..Self::from_history(h)
        }
    }
}
