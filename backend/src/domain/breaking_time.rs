//! Breaking time data model.
//!
//! Breaking times are `HH:MM` time-of-day intervals. They are normalized to
//! the 1970-01-01 reference date for storage and comparison, and always
//! formatted back as zero-padded `HH:MM` so a created value reads back
//! exactly as it was sent.

use std::fmt;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{BreakingTimeId, ScheduleId};

/// Resource name used in denial messages.
pub const RESOURCE: &str = "Breaking time";

/// Parse failure for a time-of-day string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("time of day must be in HH:MM format")]
pub struct TimeOfDayParseError;

/// A wall-clock time of day without a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Construct from components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeOfDayParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeOfDayParseError);
        }
        Ok(Self { hour, minute })
    }

    /// Parse an `HH:MM` string. A single-digit hour is accepted on input and
    /// zero-padded on output.
    pub fn parse(value: &str) -> Result<Self, TimeOfDayParseError> {
        let (hour, minute) = value.split_once(':').ok_or(TimeOfDayParseError)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(TimeOfDayParseError);
        }
        let hour: u8 = hour.parse().map_err(|_| TimeOfDayParseError)?;
        let minute: u8 = minute.parse().map_err(|_| TimeOfDayParseError)?;
        Self::new(hour, minute)
    }

    /// Normalize onto the fixed reference date used for storage.
    pub fn to_reference_datetime(self) -> DateTime<Utc> {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
        let time = date
            .and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or_default();
        time.and_utc()
    }

    /// Recover the time of day from a stored reference datetime.
    pub fn from_reference_datetime(value: DateTime<Utc>) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "hour and minute components are always below 60"
        )]
        let (hour, minute) = (value.hour() as u8, value.minute() as u8);
        Self { hour, minute }
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeOfDayParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// A break inside an employee's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingTime {
    pub id: BreakingTimeId,
    pub schedule_id: ScheduleId,
    pub starting_time: TimeOfDay,
    pub ending_time: TimeOfDay,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBreakingTime {
    pub starting_time: TimeOfDay,
    pub ending_time: TimeOfDay,
    pub schedule_id: ScheduleId,
}

/// Partial update payload; `schedule_id` is identity and cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreakingTimePatch {
    #[serde(default)]
    pub starting_time: Option<TimeOfDay>,
    #[serde(default)]
    pub ending_time: Option<TimeOfDay>,
}

pub(crate) mod schemas {
    use std::sync::LazyLock;

    use crate::domain::validation::{Constraint, Field, Schema};

    /// Create payload schema.
    pub static CREATE: LazyLock<Schema> = LazyLock::new(|| {
        Schema::new(vec![
            Field::required("starting_time", "Starting time", Constraint::TimeOfDay),
            Field::required("ending_time", "Ending time", Constraint::TimeOfDay),
            Field::required("schedule_id", "Schedule id", Constraint::Uuid),
        ])
    });

    /// Update schema: derived by dropping the owning schedule.
    pub static UPDATE: LazyLock<Schema> = LazyLock::new(|| CREATE.for_update(&["schedule_id"]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("09:00", 9, 0)]
    #[case("9:00", 9, 0)]
    #[case("23:59", 23, 59)]
    fn parses_valid_times(#[case] input: &str, #[case] hour: u8, #[case] minute: u8) {
        let time = TimeOfDay::parse(input).expect("valid time");
        assert_eq!(time.hour(), hour);
        assert_eq!(time.minute(), minute);
    }

    #[rstest]
    #[case("24:00")]
    #[case("12:60")]
    #[case("12:5")]
    #[case("1200")]
    #[case("")]
    fn rejects_invalid_times(#[case] input: &str) {
        assert_eq!(TimeOfDay::parse(input), Err(TimeOfDayParseError));
    }

    #[test]
    fn formats_zero_padded() {
        let time = TimeOfDay::parse("9:05").expect("valid time");
        assert_eq!(time.to_string(), "09:05");
    }

    #[test]
    fn reference_date_round_trip() {
        let time = TimeOfDay::parse("12:30").expect("valid time");
        let stored = time.to_reference_datetime();
        assert_eq!(stored.to_rfc3339(), "1970-01-01T12:30:00+00:00");
        assert_eq!(TimeOfDay::from_reference_datetime(stored), time);
    }

    #[test]
    fn serde_round_trip_preserves_formatting() {
        let json = serde_json::json!("09:00");
        let time: TimeOfDay = serde_json::from_value(json.clone()).expect("deserialize");
        assert_eq!(serde_json::to_value(time).expect("serialize"), json);
    }
}
