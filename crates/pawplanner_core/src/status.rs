use crate::error::AppError;
use crate::model::{Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// How finely the scheduled moment is compared against the clock.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverdueGranularity {
    /// Use the scheduled time when it parses, the date otherwise.
    #[default]
    TimeOfDay,
    /// Only a past calendar day makes a task overdue.
    Date,
}

impl OverdueGranularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TimeOfDay => "time_of_day",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for OverdueGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverdueGranularity {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "time_of_day" | "time" => Ok(Self::TimeOfDay),
            "date" | "day" => Ok(Self::Date),
            other => Err(AppError::invalid_input(format!(
                "unknown overdue granularity '{other}'; expected time_of_day|date"
            ))),
        }
    }
}

pub fn derive_status(task: &Task, now: PrimitiveDateTime) -> TaskStatus {
    derive_status_with(task, now, OverdueGranularity::default())
}

/// Completion always wins; otherwise a scheduled moment strictly before `now`
/// is overdue. Evaluated on every read so that day boundaries are never stale.
pub fn derive_status_with(
    task: &Task,
    now: PrimitiveDateTime,
    granularity: OverdueGranularity,
) -> TaskStatus {
    if task.completed {
        return TaskStatus::Completed;
    }

    let overdue = match granularity {
        OverdueGranularity::TimeOfDay => match parse_time_of_day(&task.scheduled_time) {
            Some(time) => PrimitiveDateTime::new(task.scheduled_date, time) < now,
            None => task.scheduled_date < now.date(),
        },
        OverdueGranularity::Date => task.scheduled_date < now.date(),
    };

    if overdue {
        TaskStatus::Overdue
    } else {
        TaskStatus::Pending
    }
}

/// Parses the display strings the add-task form produces: `8:00 AM`,
/// `8:00am`, `18:30` or `18:30:00`. Anything else yields `None`.
pub fn parse_time_of_day(raw: &str) -> Option<Time> {
    let normalized = raw.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return None;
    }

    let twelve_hour = format_description!("[hour repr:12 padding:none]:[minute] [period]");
    let twelve_hour_compact = format_description!("[hour repr:12 padding:none]:[minute][period]");
    let twenty_four = format_description!("[hour padding:none]:[minute]");
    let twenty_four_seconds = format_description!("[hour padding:none]:[minute]:[second]");

    Time::parse(&normalized, &twelve_hour)
        .or_else(|_| Time::parse(&normalized, &twelve_hour_compact))
        .or_else(|_| Time::parse(&normalized, &twenty_four))
        .or_else(|_| Time::parse(&normalized, &twenty_four_seconds))
        .ok()
}

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Current wall-clock time on this device.
pub fn local_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc().to_offset(local_offset());
    PrimitiveDateTime::new(now.date(), now.time())
}
