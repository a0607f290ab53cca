//! Read-only figures shown beside the task list: today's progress, progress
//! per activity, the pet's expression and appointment badges.

use crate::model::{Appointment, Task, TaskStatus, TaskType};
use crate::status::{OverdueGranularity, derive_status_with};
use serde::Serialize;
use time::{Date, PrimitiveDateTime};

const NIGHT_STARTS_AT_HOUR: u8 = 21;
const NIGHT_ENDS_AT_HOUR: u8 = 6;
const BADGE_HORIZON_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Rounded to the nearest whole percent; an empty day is 0%.
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let ratio = self.completed as f64 / self.total as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodayProgress {
    pub progress: Progress,
    pub has_overdue: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityProgress {
    pub task_type: TaskType,
    pub progress: Progress,
}

impl ActivityProgress {
    pub fn label(&self) -> &'static str {
        match self.task_type {
            TaskType::Feeding => "Feeding",
            TaskType::Walk => "Walks",
            TaskType::Medication => "Medication",
            TaskType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PetExpression {
    Sleeping,
    Sad,
    Happy,
    Content,
    Waiting,
}

impl PetExpression {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::Sad => "sad",
            Self::Happy => "happy",
            Self::Content => "content",
            Self::Waiting => "waiting",
        }
    }
}

pub fn today_progress(
    tasks: &[Task],
    now: PrimitiveDateTime,
    granularity: OverdueGranularity,
) -> TodayProgress {
    let today = now.date();
    let mut progress = Progress {
        completed: 0,
        total: 0,
    };
    let mut has_overdue = false;

    for task in tasks.iter().filter(|task| task.scheduled_date == today) {
        progress.total += 1;
        match derive_status_with(task, now, granularity) {
            TaskStatus::Completed => progress.completed += 1,
            TaskStatus::Overdue => has_overdue = true,
            TaskStatus::Pending => {}
        }
    }

    TodayProgress {
        progress,
        has_overdue,
    }
}

/// Progress per care activity over the tasks scheduled on `today`. Activities
/// with nothing scheduled are still listed with a zero total.
pub fn activity_progress(tasks: &[Task], today: Date) -> Vec<ActivityProgress> {
    [TaskType::Feeding, TaskType::Walk, TaskType::Medication]
        .into_iter()
        .map(|task_type| {
            let mut progress = Progress {
                completed: 0,
                total: 0,
            };
            for task in tasks
                .iter()
                .filter(|task| task.scheduled_date == today && task.task_type == task_type)
            {
                progress.total += 1;
                if task.completed {
                    progress.completed += 1;
                }
            }
            ActivityProgress {
                task_type,
                progress,
            }
        })
        .collect()
}

pub fn pet_expression(today: &TodayProgress, now: PrimitiveDateTime) -> PetExpression {
    let hour = now.hour();
    if hour >= NIGHT_STARTS_AT_HOUR || hour < NIGHT_ENDS_AT_HOUR {
        return PetExpression::Sleeping;
    }
    if today.has_overdue {
        return PetExpression::Sad;
    }
    if today.progress.is_complete() {
        return PetExpression::Happy;
    }
    if today.progress.completed > 0 {
        return PetExpression::Content;
    }
    PetExpression::Waiting
}

pub fn days_until(appointment: &Appointment, today: Date) -> i64 {
    (appointment.date - today).whole_days()
}

/// `Today`, `Tomorrow` or `In N days` for appointments within the next week.
pub fn appointment_badge(appointment: &Appointment, today: Date) -> Option<String> {
    match days_until(appointment, today) {
        0 => Some("Today".to_string()),
        1 => Some("Tomorrow".to_string()),
        days if (2..=BADGE_HORIZON_DAYS).contains(&days) => Some(format!("In {days} days")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Progress, TodayProgress, activity_progress, appointment_badge, pet_expression,
        today_progress, PetExpression,
    };
    use crate::model::{Appointment, Task, TaskType};
    use crate::status::OverdueGranularity;
    use time::macros::{date, datetime};
    use time::Date;

    fn task(task_type: TaskType, date: Date, time: &str, completed: bool) -> Task {
        Task {
            id: format!("task-{time}"),
            title: "demo".to_string(),
            task_type,
            scheduled_date: date,
            scheduled_time: time.to_string(),
            completed,
            notes: None,
        }
    }

    fn appointment(date: Date) -> Appointment {
        Appointment {
            id: "appt-1".to_string(),
            title: "Vet Checkup".to_string(),
            date,
            time: "2:00 PM".to_string(),
            location: "Happy Paws Veterinary Clinic".to_string(),
            notes: None,
        }
    }

    #[test]
    fn percentage_rounds_and_handles_empty_day() {
        assert_eq!(Progress { completed: 0, total: 0 }.percentage(), 0);
        assert_eq!(Progress { completed: 1, total: 3 }.percentage(), 33);
        assert_eq!(Progress { completed: 2, total: 3 }.percentage(), 67);
        assert_eq!(Progress { completed: 3, total: 3 }.percentage(), 100);
    }

    #[test]
    fn today_progress_counts_only_today_and_flags_overdue() {
        let today = date!(2025 - 11 - 10);
        let tasks = vec![
            task(TaskType::Feeding, today, "8:00 AM", true),
            task(TaskType::Walk, today, "9:00 AM", false),
            task(TaskType::Walk, today, "8:00 PM", false),
            task(TaskType::Walk, date!(2025 - 11 - 11), "8:00 AM", true),
        ];

        let summary = today_progress(&tasks, datetime!(2025-11-10 12:00), OverdueGranularity::TimeOfDay);

        assert_eq!(summary.progress, Progress { completed: 1, total: 3 });
        assert!(summary.has_overdue);
    }

    #[test]
    fn activity_progress_groups_by_type() {
        let today = date!(2025 - 11 - 10);
        let tasks = vec![
            task(TaskType::Feeding, today, "8:00 AM", true),
            task(TaskType::Feeding, today, "12:00 PM", true),
            task(TaskType::Feeding, today, "6:00 PM", false),
            task(TaskType::Walk, today, "9:00 AM", true),
            task(TaskType::Walk, today, "4:00 PM", false),
        ];

        let activities = activity_progress(&tasks, today);

        assert_eq!(activities.len(), 3);
        assert_eq!(activities[0].label(), "Feeding");
        assert_eq!(activities[0].progress, Progress { completed: 2, total: 3 });
        assert_eq!(activities[1].progress, Progress { completed: 1, total: 2 });
        assert_eq!(activities[2].progress, Progress { completed: 0, total: 0 });
    }

    #[test]
    fn pet_expression_follows_time_and_progress() {
        let idle = TodayProgress {
            progress: Progress { completed: 0, total: 2 },
            has_overdue: false,
        };
        let partial = TodayProgress {
            progress: Progress { completed: 1, total: 2 },
            has_overdue: false,
        };
        let done = TodayProgress {
            progress: Progress { completed: 2, total: 2 },
            has_overdue: false,
        };
        let late = TodayProgress {
            progress: Progress { completed: 1, total: 2 },
            has_overdue: true,
        };
        let noon = datetime!(2025-11-10 12:00);

        assert_eq!(pet_expression(&idle, noon), PetExpression::Waiting);
        assert_eq!(pet_expression(&partial, noon), PetExpression::Content);
        assert_eq!(pet_expression(&done, noon), PetExpression::Happy);
        assert_eq!(pet_expression(&late, noon), PetExpression::Sad);
        assert_eq!(pet_expression(&late, datetime!(2025-11-10 22:00)), PetExpression::Sleeping);
        assert_eq!(pet_expression(&done, datetime!(2025-11-10 05:59)), PetExpression::Sleeping);
    }

    #[test]
    fn appointment_badge_covers_the_coming_week() {
        let today = date!(2025 - 11 - 10);

        assert_eq!(appointment_badge(&appointment(today), today).as_deref(), Some("Today"));
        assert_eq!(
            appointment_badge(&appointment(date!(2025 - 11 - 11)), today).as_deref(),
            Some("Tomorrow")
        );
        assert_eq!(
            appointment_badge(&appointment(date!(2025 - 11 - 15)), today).as_deref(),
            Some("In 5 days")
        );
        assert_eq!(appointment_badge(&appointment(date!(2025 - 11 - 18)), today), None);
        assert_eq!(appointment_badge(&appointment(date!(2025 - 11 - 09)), today), None);
    }
}
