//! Date and time reformatting between form inputs, the wire format and display.
//!
//! Form inputs use 24-hour `HH:MM` and `YYYY-MM-DD`; the backend expects
//! 12-hour `h:mm AM/PM` and an ISO date at midnight UTC.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    Date, OffsetDateTime, UtcOffset,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

lazy_static! {
    static ref TIME_24_RE: Regex = Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap();
    static ref TIME_12_RE: Regex = Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*(AM|PM)$").unwrap();
    static ref AM_PM_RE: Regex = Regex::new(r"(?i)\b(am|pm)\b").unwrap();
    static ref SPACES_RE: Regex = Regex::new(r"\s+").unwrap();
}

const YMD: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DISPLAY_DATE: &[FormatItem<'static>] =
    format_description!("[weekday repr:short], [month repr:short] [day padding:none], [year]");
const DISPLAY_DATE_TIME: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short], [month repr:short] [day padding:none], [year], [hour repr:12 padding:none]:[minute] [period]"
);

fn parse_24(value: &str) -> Option<(u8, u8)> {
    let caps = TIME_24_RE.captures(value.trim())?;
    let hours: u8 = caps[1].parse().ok()?;
    let minutes: u8 = caps[2].parse().ok()?;
    (hours < 24 && minutes < 60).then_some((hours, minutes))
}

fn parse_12(value: &str) -> Option<(u8, u8)> {
    let caps = TIME_12_RE.captures(value.trim())?;
    let hours: u8 = caps[1].parse().ok()?;
    let minutes: u8 = caps[2].parse().ok()?;
    if !(1..=12).contains(&hours) || minutes >= 60 {
        return None;
    }
    let pm = caps[3].eq_ignore_ascii_case("PM");
    let hours = match (pm, hours) {
        (true, h) if h < 12 => h + 12,
        (false, 12) => 0,
        (_, h) => h,
    };
    Some((hours, minutes))
}

fn format_12(hours: u8, minutes: u8) -> String {
    let period = if hours >= 12 { "PM" } else { "AM" };
    let display_hour = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minutes:02} {period}")
}

/// `"19:05"` -> `"7:05 PM"`.
pub fn to_12_hour(time24: &str) -> Result<String, FormatError> {
    parse_24(time24)
        .map(|(h, m)| format_12(h, m))
        .ok_or_else(|| FormatError::InvalidTime(time24.to_string()))
}

/// `"7:05 pm"` or `"7:05"` -> `"19:05"` / `"07:05"`. `None` when blank or unparseable.
pub fn to_24_hour(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let (h, m) = parse_24(value).or_else(|| parse_12(value))?;
    Some(format!("{h:02}:{m:02}"))
}

/// `"2024-05-01"` -> `"2024-05-01T00:00:00.000Z"`.
pub fn iso_date_from_ymd(ymd: &str) -> Result<String, FormatError> {
    let date = Date::parse(ymd.trim(), YMD)
        .map_err(|_| FormatError::InvalidDate(ymd.to_string()))?;
    let ymd = date
        .format(YMD)
        .map_err(|_| FormatError::InvalidDate(ymd.to_string()))?;
    Ok(format!("{ymd}T00:00:00.000Z"))
}

/// Date part of an ISO timestamp, for pre-filling a date input.
pub fn ymd_from_iso(iso: &str) -> String {
    iso.split('T').next().unwrap_or_default().trim().to_string()
}

/// Time for display: a 12-hour value is normalized, a 24-hour value converted.
/// Anything else is shown as given.
pub fn display_time(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if AM_PM_RE.is_match(trimmed) {
        return SPACES_RE.replace_all(trimmed, " ").to_uppercase();
    }
    match parse_24(trimmed) {
        Some((h, m)) => format_12(h, m),
        None => trimmed.to_string(),
    }
}

fn parse_instant(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(dt.to_offset(UtcOffset::UTC));
    }
    Date::parse(value, YMD)
        .ok()
        .map(|d| d.midnight().assume_utc())
}

/// `"2024-05-01T00:00:00.000Z"` -> `"Wed, May 1, 2024"` (UTC).
pub fn display_date(value: &str) -> String {
    parse_instant(value)
        .and_then(|dt| dt.format(DISPLAY_DATE).ok())
        .unwrap_or_else(|| value.to_string())
}

/// `"2024-05-01T19:33:00Z"` -> `"Wed, May 1, 2024, 7:33 PM"` (UTC).
pub fn display_date_time(value: &str) -> String {
    parse_instant(value)
        .and_then(|dt| dt.format(DISPLAY_DATE_TIME).ok())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_12_hour_examples() {
        assert_eq!(to_12_hour("00:00").unwrap(), "12:00 AM");
        assert_eq!(to_12_hour("09:05").unwrap(), "9:05 AM");
        assert_eq!(to_12_hour("12:30").unwrap(), "12:30 PM");
        assert_eq!(to_12_hour("19:33").unwrap(), "7:33 PM");
        assert_eq!(to_12_hour("7:00").unwrap(), "7:00 AM");
    }

    #[test]
    fn to_12_hour_rejects_garbage() {
        for bad in ["", "24:00", "10:60", "noon", "7:33 PM", "1:2"] {
            assert!(to_12_hour(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn to_24_hour_examples() {
        assert_eq!(to_24_hour("7:33 PM").as_deref(), Some("19:33"));
        assert_eq!(to_24_hour("12:00 am").as_deref(), Some("00:00"));
        assert_eq!(to_24_hour("12:15 PM").as_deref(), Some("12:15"));
        assert_eq!(to_24_hour("7:33PM").as_deref(), Some("19:33"));
        assert_eq!(to_24_hour("9:05").as_deref(), Some("09:05"));
        assert_eq!(to_24_hour("   "), None);
        assert_eq!(to_24_hour("13:00 PM"), None);
        assert_eq!(to_24_hour("soon"), None);
    }

    #[test]
    fn round_trip_is_stable_for_every_minute() {
        for h in 0..24 {
            for m in 0..60 {
                let t = format!("{h:02}:{m:02}");
                let once = to_12_hour(&t).unwrap();
                let back = to_24_hour(&once).unwrap();
                assert_eq!(back, t);
                assert_eq!(to_12_hour(&back).unwrap(), once);
            }
        }
    }

    #[test]
    fn iso_date_is_midnight_utc() {
        assert_eq!(
            iso_date_from_ymd("2024-05-01").unwrap(),
            "2024-05-01T00:00:00.000Z"
        );
        assert!(iso_date_from_ymd("2024-02-30").is_err());
        assert!(iso_date_from_ymd("01/05/2024").is_err());
    }

    #[test]
    fn ymd_from_iso_takes_date_part() {
        assert_eq!(ymd_from_iso("2024-05-01T00:00:00.000Z"), "2024-05-01");
        assert_eq!(ymd_from_iso("2024-05-01"), "2024-05-01");
        assert_eq!(ymd_from_iso(""), "");
    }

    #[test]
    fn display_time_normalizes() {
        assert_eq!(display_time("7:33   pm"), "7:33 PM");
        assert_eq!(display_time("19:33"), "7:33 PM");
        assert_eq!(display_time(" later "), "later");
        assert_eq!(display_time(""), "");
    }

    #[test]
    fn display_dates() {
        assert_eq!(display_date("2024-05-01T00:00:00.000Z"), "Wed, May 1, 2024");
        assert_eq!(display_date("2024-05-01"), "Wed, May 1, 2024");
        assert_eq!(
            display_date_time("2024-05-01T19:33:00Z"),
            "Wed, May 1, 2024, 7:33 PM"
        );
        assert_eq!(
            display_date_time("2024-05-01T21:33:00+02:00"),
            "Wed, May 1, 2024, 7:33 PM"
        );
        assert_eq!(display_date("not a date"), "not a date");
    }
}
