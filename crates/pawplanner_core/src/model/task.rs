use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub scheduled_date: Date,
    /// Display string as entered, e.g. `8:00 AM` or `18:30`.
    #[serde(default)]
    pub scheduled_time: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A task as submitted by the add-task form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub task_type: TaskType,
    pub scheduled_date: Date,
    pub scheduled_time: String,
    pub notes: Option<String>,
}

impl NewTask {
    pub fn new<T: Into<String>>(title: T, task_type: TaskType, scheduled_date: Date) -> Self {
        Self {
            title: title.into(),
            task_type,
            scheduled_date,
            scheduled_time: String::new(),
            notes: None,
        }
    }

    pub fn at<T: Into<String>>(mut self, scheduled_time: T) -> Self {
        self.scheduled_time = scheduled_time.into();
        self
    }

    pub fn with_notes<T: Into<String>>(mut self, notes: T) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Feeding,
    Walk,
    Medication,
    Other,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        TaskType::Feeding,
        TaskType::Walk,
        TaskType::Medication,
        TaskType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feeding => "feeding",
            Self::Walk => "walk",
            Self::Medication => "medication",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "feeding" | "feed" => Ok(Self::Feeding),
            "walk" => Ok(Self::Walk),
            "medication" | "meds" => Ok(Self::Medication),
            "other" => Ok(Self::Other),
            "" => Err(AppError::invalid_input("type is required")),
            other => Err(AppError::invalid_input(format!(
                "unknown task type '{other}'; expected feeding|walk|medication|other"
            ))),
        }
    }
}

/// Lifecycle status. Never stored; see [`crate::status::derive_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTask, Task, TaskType};
    use time::macros::date;

    #[test]
    fn task_type_parses_aliases_and_rejects_unknown() {
        assert_eq!("Feeding".parse::<TaskType>().unwrap(), TaskType::Feeding);
        assert_eq!(" meds ".parse::<TaskType>().unwrap(), TaskType::Medication);

        let err = "bath".parse::<TaskType>().unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        let err = "  ".parse::<TaskType>().unwrap_err();
        assert_eq!(err.message(), "type is required");
    }

    #[test]
    fn task_serializes_type_and_iso_date() {
        let task = Task {
            id: "task-1".to_string(),
            title: "Morning feeding".to_string(),
            task_type: TaskType::Feeding,
            scheduled_date: date!(2025 - 11 - 10),
            scheduled_time: "8:00 AM".to_string(),
            completed: false,
            notes: None,
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "feeding");
        assert_eq!(value["scheduled_date"], "2025-11-10");
        assert_eq!(value["scheduled_time"], "8:00 AM");
    }

    #[test]
    fn new_task_builder_sets_optional_fields() {
        let candidate = NewTask::new("Evening walk", TaskType::Walk, date!(2025 - 11 - 11))
            .at("7:00 PM")
            .with_notes("around the park");

        assert_eq!(candidate.scheduled_time, "7:00 PM");
        assert_eq!(candidate.notes.as_deref(), Some("around the park"));
    }
}
