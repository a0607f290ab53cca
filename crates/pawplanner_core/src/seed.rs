//! Sample data every session starts from.

use crate::model::{Appointment, Mood, MoodEntry, Pet, Task, TaskType};
use time::{Duration, PrimitiveDateTime};

pub fn sample_tasks(now: PrimitiveDateTime) -> Vec<Task> {
    let today = now.date();
    let tomorrow = today + Duration::days(1);
    let day_after = today + Duration::days(2);

    [
        ("Morning feeding", TaskType::Feeding, "8:00 AM", today, true),
        ("Morning walk", TaskType::Walk, "9:00 AM", today, true),
        ("Lunch feeding", TaskType::Feeding, "12:00 PM", today, false),
        ("Afternoon walk", TaskType::Walk, "4:00 PM", today, false),
        ("Evening medication", TaskType::Medication, "6:00 PM", today, false),
        ("Morning walk", TaskType::Walk, "8:30 AM", tomorrow, false),
        ("Breakfast", TaskType::Feeding, "9:00 AM", tomorrow, false),
        ("Evening walk", TaskType::Walk, "7:00 PM", day_after, false),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (title, task_type, time, date, completed))| Task {
        id: format!("task-{}", index + 1),
        title: title.to_string(),
        task_type,
        scheduled_date: date,
        scheduled_time: time.to_string(),
        completed,
        notes: None,
    })
    .collect()
}

/// Oldest first, the order they were logged in.
pub fn sample_moods(now: PrimitiveDateTime) -> Vec<MoodEntry> {
    [
        (Mood::Happy, 2, "Very playful today!"),
        (Mood::Energetic, 1, "Lots of running around"),
        (Mood::Calm, 0, "Relaxed after walk"),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (mood, days_ago, note))| MoodEntry {
        id: format!("mood-{}", index + 1),
        mood,
        logged_at: now - Duration::days(days_ago),
        note: Some(note.to_string()),
    })
    .collect()
}

pub fn sample_appointments(now: PrimitiveDateTime) -> Vec<Appointment> {
    let today = now.date();
    vec![
        Appointment {
            id: "appt-1".to_string(),
            title: "Vet Checkup".to_string(),
            date: today + Duration::days(3),
            time: "2:00 PM".to_string(),
            location: "Happy Paws Veterinary Clinic".to_string(),
            notes: Some("Annual checkup and vaccination update".to_string()),
        },
        Appointment {
            id: "appt-2".to_string(),
            title: "Grooming Appointment".to_string(),
            date: today + Duration::days(8),
            time: "10:00 AM".to_string(),
            location: "Pampered Pets Salon".to_string(),
            notes: None,
        },
    ]
}

pub fn sample_pet(name: &str) -> Pet {
    Pet {
        id: "pet-1".to_string(),
        name: name.to_string(),
        species: "dog".to_string(),
        breed: None,
        age: None,
    }
}
