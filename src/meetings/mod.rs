pub mod format;
mod model;
mod status;

pub use model::{
    BackendParticipant, HistoryItem, Meeting, MeetingDetails, MeetingInfo, MeetingRequest,
    MentorInfo, Participant, Profile, UpcomingMeeting,
};
pub use status::MeetingStatus;
