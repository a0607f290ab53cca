use crate::error::AppError;
use crate::model::{Task, TaskStatus};
use crate::status::{OverdueGranularity, derive_status_with};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, Duration, PrimitiveDateTime, Weekday};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sunday,
            Self::Monday => Weekday::Monday,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekStart {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            other => Err(AppError::invalid_input(format!(
                "unsupported week start '{other}'; expected sunday|monday"
            ))),
        }
    }
}

/// A task paired with the status derived when the projection was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: Date,
    pub is_today: bool,
    pub tasks: Vec<TaskView>,
}

impl DayBucket {
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|view| view.task.completed).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekProjection {
    pub week_start: Date,
    pub days: Vec<DayBucket>,
}

impl WeekProjection {
    pub fn week_end(&self) -> Date {
        self.days
            .last()
            .map(|day| day.date)
            .unwrap_or(self.week_start)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.week_start <= date && date <= self.week_end()
    }
}

fn week_out_of_range() -> AppError {
    AppError::invalid_input("week offset out of range")
}

/// First day of the week containing `anchor`. Fails when that week does not
/// fit inside the supported calendar.
pub fn start_of_week(anchor: Date, week_start: WeekStart) -> Result<Date, AppError> {
    let offset = i64::from(anchor.weekday().number_days_from_sunday())
        - i64::from(week_start.weekday().number_days_from_sunday());
    let back = offset.rem_euclid(DAYS_PER_WEEK as i64);
    anchor
        .checked_sub(Duration::days(back))
        .ok_or_else(week_out_of_range)
}

/// Moves the anchor by whole weeks; negative values page backwards.
pub fn shift_week(anchor: Date, weeks: i64) -> Result<Date, AppError> {
    let julian_day = weeks
        .checked_mul(DAYS_PER_WEEK as i64)
        .and_then(|days| days.checked_add(i64::from(anchor.to_julian_day())))
        .and_then(|day| i32::try_from(day).ok())
        .ok_or_else(week_out_of_range)?;
    Date::from_julian_day(julian_day).map_err(|_| week_out_of_range())
}

pub fn view_task(task: &Task, now: PrimitiveDateTime, granularity: OverdueGranularity) -> TaskView {
    TaskView {
        task: task.clone(),
        status: derive_status_with(task, now, granularity),
    }
}

/// Groups tasks into the seven days of the week containing `anchor`. Buckets
/// keep the collection order; tasks outside the window are left out.
pub fn project_week(
    tasks: &[Task],
    anchor: Date,
    week_start: WeekStart,
    now: PrimitiveDateTime,
    granularity: OverdueGranularity,
) -> Result<WeekProjection, AppError> {
    let first = start_of_week(anchor, week_start)?;
    let today = now.date();
    let mut days = (0..DAYS_PER_WEEK as i64)
        .map(|offset| {
            let date = first
                .checked_add(Duration::days(offset))
                .ok_or_else(week_out_of_range)?;
            Ok(DayBucket {
                date,
                is_today: date == today,
                tasks: Vec::new(),
            })
        })
        .collect::<Result<Vec<DayBucket>, AppError>>()?;

    for task in tasks {
        let offset = (task.scheduled_date - first).whole_days();
        if !(0..DAYS_PER_WEEK as i64).contains(&offset) {
            continue;
        }
        days[offset as usize]
            .tasks
            .push(view_task(task, now, granularity));
    }

    Ok(WeekProjection {
        week_start: first,
        days,
    })
}
