//! The four-step pet care guide and the steps a session has worked through.

use crate::error::AppError;
use crate::summary::Progress;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuideStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tips: &'static [&'static str],
}

pub const GUIDE_STEPS: [GuideStep; 4] = [
    GuideStep {
        id: "personality",
        title: "Understand Their Personality",
        description: "Every pet has a unique personality. Learn to recognize their traits!",
        tips: &[
            "Observe how they interact with new people and pets",
            "Notice their energy levels throughout the day",
            "Pay attention to their favorite activities and toys",
            "Track their reactions to different situations",
        ],
    },
    GuideStep {
        id: "health",
        title: "Monitor Their Health",
        description: "Regular health tracking helps catch issues early and keeps them happy.",
        tips: &[
            "Check their eyes, ears, and teeth weekly",
            "Monitor their eating and drinking habits",
            "Track their bathroom routines",
            "Watch for changes in behavior or energy",
        ],
    },
    GuideStep {
        id: "activity",
        title: "Exercise & Play Needs",
        description: "Physical activity is crucial for your pet's wellbeing.",
        tips: &[
            "Different breeds have different exercise needs",
            "Mix up activities to keep them engaged",
            "Use playtime to strengthen your bond",
            "Adjust activity levels based on age and health",
        ],
    },
    GuideStep {
        id: "nutrition",
        title: "Nutrition & Diet",
        description: "Proper nutrition is the foundation of a healthy, happy pet.",
        tips: &[
            "Choose high-quality food appropriate for their age",
            "Maintain consistent feeding times",
            "Monitor their weight and adjust portions",
            "Limit treats to 10% of daily calories",
        ],
    },
];

/// Session progress through [`GUIDE_STEPS`]. Completed ids are kept in the
/// order they were completed and never repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareGuide {
    current: usize,
    completed: Vec<&'static str>,
}

impl CareGuide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &'static [GuideStep] {
        &GUIDE_STEPS
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &'static GuideStep {
        &GUIDE_STEPS[self.current]
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.iter().any(|done| *done == id)
    }

    /// Focuses the zero-based step `index`.
    pub fn select(&mut self, index: usize) -> Result<&'static GuideStep, AppError> {
        if index >= GUIDE_STEPS.len() {
            return Err(AppError::invalid_input(format!(
                "guide step must be between 1 and {}",
                GUIDE_STEPS.len()
            )));
        }
        self.current = index;
        Ok(&GUIDE_STEPS[index])
    }

    /// Marks a step done and moves focus to the step after it. Completing a
    /// step twice is a no-op for the progress count.
    pub fn complete(&mut self, id: &str) -> Result<&'static GuideStep, AppError> {
        let wanted = id.trim().to_ascii_lowercase();
        let index = GUIDE_STEPS
            .iter()
            .position(|step| step.id == wanted)
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "unknown guide step '{}'; expected personality|health|activity|nutrition",
                    id.trim()
                ))
            })?;

        let step = &GUIDE_STEPS[index];
        if !self.is_completed(step.id) {
            self.completed.push(step.id);
        }
        self.current = (index + 1).min(GUIDE_STEPS.len() - 1);
        Ok(step)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.completed.len(),
            total: GUIDE_STEPS.len(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress().is_complete()
    }
}
