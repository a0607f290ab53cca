use crate::model::{MoodEntry, Pet, Task};

/// Emitted by the dashboard after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    TaskAdded(Task),
    TaskToggled(Task),
    TaskDeleted(Task),
    MoodLogged(MoodEntry),
    PetAdded(Pet),
    GuideStepCompleted(&'static str),
}

impl DashboardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskAdded(_) => "task_added",
            Self::TaskToggled(_) => "task_toggled",
            Self::TaskDeleted(_) => "task_deleted",
            Self::MoodLogged(_) => "mood_logged",
            Self::PetAdded(_) => "pet_added",
            Self::GuideStepCompleted(_) => "guide_step_completed",
        }
    }
}

pub trait Listener {
    fn on_event(&mut self, event: &DashboardEvent);
}

impl<F> Listener for F
where
    F: FnMut(&DashboardEvent),
{
    fn on_event(&mut self, event: &DashboardEvent) {
        self(event)
    }
}
