use serde::Serialize;

use crate::meetings::{
    format::{iso_date_from_ymd, to_12_hour, to_24_hour, ymd_from_iso, FormatError},
    Meeting,
};

/// New mentorship request as entered: `YYYY-MM-DD` and 24-hour `HH:MM`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleForm {
    pub topic: String,
    pub details: String,
    pub preferred_date: String,
    pub preferred_start_time: String,
    pub preferred_end_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescheduleForm {
    pub preferred_date: String,
    pub preferred_start_time: String,
    pub preferred_end_time: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub topic: String,
    pub description: String,
    pub preferred_date: String,
    pub preferred_start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_end_time: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleBody {
    pub preferred_date: String,
    pub preferred_start_time: String,
    pub preferred_end_time: String,
}

impl ScheduleForm {
    pub fn to_body(&self) -> Result<CreateRequestBody, FormatError> {
        let preferred_end_time = match self.preferred_end_time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Some(to_12_hour(t)?),
            _ => None,
        };
        Ok(CreateRequestBody {
            topic: self.topic.clone(),
            description: self.details.clone(),
            preferred_date: iso_date_from_ymd(&self.preferred_date)?,
            preferred_start_time: to_12_hour(&self.preferred_start_time)?,
            preferred_end_time,
        })
    }
}

impl RescheduleForm {
    /// Pre-fills the form from a meeting's current wire values.
    pub fn from_meeting(m: &Meeting) -> Self {
        Self {
            preferred_date: ymd_from_iso(&m.preferred_date),
            preferred_start_time: to_24_hour(&m.preferred_start_time).unwrap_or_default(),
            preferred_end_time: m
                .preferred_end_time
                .as_deref()
                .and_then(to_24_hour)
                .unwrap_or_default(),
        }
    }

    pub fn to_body(&self) -> Result<RescheduleBody, FormatError> {
        Ok(RescheduleBody {
            preferred_date: iso_date_from_ymd(&self.preferred_date)?,
            preferred_start_time: to_12_hour(&self.preferred_start_time)?,
            preferred_end_time: to_12_hour(&self.preferred_end_time)?,
        })
    }
}
