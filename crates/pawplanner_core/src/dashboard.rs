use crate::config::Config;
use crate::error::AppError;
use crate::events::{DashboardEvent, Listener};
use crate::guide::{CareGuide, GuideStep};
use crate::model::{Appointment, Mood, MoodEntry, NewPet, NewTask, Pet, Task, TaskStatus};
use crate::mood_log::MoodLog;
use crate::seed;
use crate::status::{OverdueGranularity, derive_status_with, local_now};
use crate::summary::{self, ActivityProgress, PetExpression, TodayProgress};
use crate::task_store::TaskStore;
use crate::week::{TaskView, WeekProjection, WeekStart, project_week, view_task};
use log::debug;
use time::{Date, PrimitiveDateTime};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    pub week_start: WeekStart,
    pub overdue_granularity: OverdueGranularity,
}

impl From<&Config> for DashboardSettings {
    fn from(config: &Config) -> Self {
        Self {
            week_start: config.week_start,
            overdue_granularity: config.overdue_granularity,
        }
    }
}

/// Session state behind the dashboard and the single command surface the
/// view layer talks to. Every successful mutation is announced to the
/// subscribed listeners.
pub struct Dashboard {
    settings: DashboardSettings,
    tasks: TaskStore,
    moods: MoodLog,
    appointments: Vec<Appointment>,
    pets: Vec<Pet>,
    guide: CareGuide,
    listeners: Vec<Box<dyn Listener>>,
}

impl Dashboard {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            settings,
            tasks: TaskStore::new(),
            moods: MoodLog::new(),
            appointments: Vec::new(),
            pets: Vec::new(),
            guide: CareGuide::new(),
            listeners: Vec::new(),
        }
    }

    /// A session populated with the sample tasks, moods, appointments and pet
    /// laid out around `now`.
    pub fn seeded(config: &Config, now: PrimitiveDateTime) -> Result<Self, AppError> {
        let mut dashboard = Self::new(DashboardSettings::from(config));
        dashboard.tasks = TaskStore::with_tasks(seed::sample_tasks(now))?;
        dashboard.moods = MoodLog::with_entries(seed::sample_moods(now));
        dashboard.appointments = seed::sample_appointments(now);
        dashboard.pets = vec![seed::sample_pet(config.pet_name())];
        Ok(dashboard)
    }

    pub fn settings(&self) -> DashboardSettings {
        self.settings
    }

    /// Settings only affect derived views; stored tasks are untouched.
    pub fn apply_settings(&mut self, settings: DashboardSettings) {
        self.settings = settings;
    }

    pub fn subscribe<L: Listener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_task(&mut self, candidate: NewTask) -> Result<Task, AppError> {
        let task = self.tasks.add_task(candidate)?;
        self.emit(DashboardEvent::TaskAdded(task.clone()));
        Ok(task)
    }

    /// Unknown ids are ignored and yield `Ok(None)`.
    pub fn toggle_complete(&mut self, id: &str) -> Result<Option<Task>, AppError> {
        match self.tasks.toggle_complete(id) {
            Ok(task) => {
                self.emit(DashboardEvent::TaskToggled(task.clone()));
                Ok(Some(task))
            }
            Err(err) => ignore_not_found(err, "toggle"),
        }
    }

    /// Unknown ids are ignored and yield `Ok(None)`.
    pub fn delete_task(&mut self, id: &str) -> Result<Option<Task>, AppError> {
        match self.tasks.delete_task(id) {
            Ok(task) => {
                self.emit(DashboardEvent::TaskDeleted(task.clone()));
                Ok(Some(task))
            }
            Err(err) => ignore_not_found(err, "delete"),
        }
    }

    pub fn log_mood(&mut self, mood: Mood, note: Option<&str>) -> MoodEntry {
        self.log_mood_at(mood, note, local_now())
    }

    pub fn log_mood_at(
        &mut self,
        mood: Mood,
        note: Option<&str>,
        logged_at: PrimitiveDateTime,
    ) -> MoodEntry {
        let entry = self.moods.log(mood, note, logged_at);
        self.emit(DashboardEvent::MoodLogged(entry.clone()));
        entry
    }

    pub fn add_pet(&mut self, candidate: NewPet) -> Result<Pet, AppError> {
        let name = candidate.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("pet name is required"));
        }
        let species = candidate.species.trim();
        if species.is_empty() {
            return Err(AppError::invalid_input("pet type is required"));
        }

        let pet = Pet {
            id: format!("pet-{}", self.pets.len() + 1),
            name: name.to_string(),
            species: species.to_ascii_lowercase(),
            breed: candidate
                .breed
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            age: candidate.age,
        };

        self.pets.push(pet.clone());
        self.emit(DashboardEvent::PetAdded(pet.clone()));
        Ok(pet)
    }

    pub fn guide(&self) -> &CareGuide {
        &self.guide
    }

    pub fn select_guide_step(&mut self, index: usize) -> Result<&'static GuideStep, AppError> {
        self.guide.select(index)
    }

    pub fn complete_guide_step(&mut self, id: &str) -> Result<&'static GuideStep, AppError> {
        let step = self.guide.complete(id)?;
        self.emit(DashboardEvent::GuideStepCompleted(step.id));
        Ok(step)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id.trim())
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn derive_status(&self, task: &Task, now: PrimitiveDateTime) -> TaskStatus {
        derive_status_with(task, now, self.settings.overdue_granularity)
    }

    pub fn view_task(&self, id: &str, now: PrimitiveDateTime) -> Option<TaskView> {
        self.task(id)
            .map(|task| view_task(task, now, self.settings.overdue_granularity))
    }

    pub fn list_tasks_for_date(&self, date: Date, now: PrimitiveDateTime) -> Vec<TaskView> {
        self.tasks
            .tasks_on(date)
            .map(|task| view_task(task, now, self.settings.overdue_granularity))
            .collect()
    }

    pub fn list_tasks_for_week(
        &self,
        anchor: Date,
        now: PrimitiveDateTime,
    ) -> Result<WeekProjection, AppError> {
        project_week(
            self.tasks.tasks(),
            anchor,
            self.settings.week_start,
            now,
            self.settings.overdue_granularity,
        )
    }

    pub fn list_mood_entries(&self) -> Vec<MoodEntry> {
        self.moods.newest_first()
    }

    /// Appointments ordered by date, then by entry order.
    pub fn appointments(&self) -> Vec<&Appointment> {
        let mut appointments: Vec<&Appointment> = self.appointments.iter().collect();
        appointments.sort_by_key(|appointment| appointment.date);
        appointments
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn today_progress(&self, now: PrimitiveDateTime) -> TodayProgress {
        summary::today_progress(self.tasks.tasks(), now, self.settings.overdue_granularity)
    }

    pub fn activity_progress(&self, today: Date) -> Vec<ActivityProgress> {
        summary::activity_progress(self.tasks.tasks(), today)
    }

    pub fn pet_expression(&self, now: PrimitiveDateTime) -> PetExpression {
        summary::pet_expression(&self.today_progress(now), now)
    }

    fn emit(&mut self, event: DashboardEvent) {
        debug!(
            "event=dashboard_notify module=dashboard status=ok kind={} listeners={}",
            event.name(),
            self.listeners.len()
        );
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}

fn ignore_not_found(err: AppError, action: &str) -> Result<Option<Task>, AppError> {
    if err.is_not_found() {
        debug!(
            "event=task_{action} module=dashboard status=ignored reason={}",
            err.message()
        );
        Ok(None)
    } else {
        Err(err)
    }
}
