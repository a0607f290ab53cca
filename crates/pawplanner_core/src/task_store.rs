use crate::error::AppError;
use crate::model::{NewTask, Task};
use log::{debug, info};
use time::Date;

const ID_PREFIX: &str = "task-";

/// Ordered, in-memory collection of tasks for one session.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing records. Fresh ids are numbered past the
    /// highest `task-<n>` already present.
    pub fn with_tasks(tasks: Vec<Task>) -> Result<Self, AppError> {
        let mut store = Self::new();
        for task in tasks {
            if store.get(&task.id).is_some() {
                return Err(AppError::invalid_data(format!(
                    "duplicate task id '{}'",
                    task.id
                )));
            }
            if let Some(number) = numeric_suffix(&task.id) {
                store.next_id = store.next_id.max(number + 1);
            }
            store.tasks.push(task);
        }
        Ok(store)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks_on(&self, date: Date) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.scheduled_date == date)
    }

    pub fn add_task(&mut self, candidate: NewTask) -> Result<Task, AppError> {
        let title = candidate.title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }

        let notes = candidate
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let task = Task {
            id: self.allocate_id(),
            title: title.to_string(),
            task_type: candidate.task_type,
            scheduled_date: candidate.scheduled_date,
            scheduled_time: candidate.scheduled_time.trim().to_string(),
            completed: false,
            notes,
        };

        self.tasks.push(task.clone());
        info!(
            "event=task_added module=store status=ok id={} type={} date={}",
            task.id, task.task_type, task.scheduled_date
        );

        Ok(task)
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<Task, AppError> {
        let trimmed_id = require_id(id)?;
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == trimmed_id)
            .ok_or_else(|| not_found(trimmed_id))?;

        task.completed = !task.completed;
        debug!(
            "event=task_toggled module=store status=ok id={} completed={}",
            task.id, task.completed
        );

        Ok(task.clone())
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task, AppError> {
        let trimmed_id = require_id(id)?;
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == trimmed_id)
            .ok_or_else(|| not_found(trimmed_id))?;

        let removed = self.tasks.remove(index);
        info!(
            "event=task_deleted module=store status=ok id={}",
            removed.id
        );

        Ok(removed)
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{ID_PREFIX}{}", self.next_id);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn require_id(id: &str) -> Result<&str, AppError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }
    Ok(trimmed)
}

fn not_found(id: &str) -> AppError {
    AppError::not_found(format!("task '{id}' not found"))
}

fn numeric_suffix(id: &str) -> Option<u64> {
    id.strip_prefix(ID_PREFIX)?.parse().ok()
}
