use serde::{Deserialize, Serialize};
use std::fmt;

/// Display status of a meeting or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Pending,
    Scheduled,
    Cancelled,
    Completed,
}

impl MeetingStatus {
    /// Maps the backend's uppercase status; anything unrecognized is pending.
    pub fn from_backend(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" => Self::Scheduled,
            "COMPLETED" => Self::Completed,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
