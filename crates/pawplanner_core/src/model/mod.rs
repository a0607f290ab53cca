mod appointment;
mod mood;
mod pet;
mod task;

pub use appointment::Appointment;
pub use mood::{Mood, MoodEntry};
pub use pet::{NewPet, Pet};
pub use task::{NewTask, Task, TaskStatus, TaskType};
