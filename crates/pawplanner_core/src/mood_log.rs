use crate::model::{Mood, MoodEntry};
use log::info;
use time::PrimitiveDateTime;

const ID_PREFIX: &str = "mood-";

/// Append-only log of mood observations.
#[derive(Debug, Clone, Default)]
pub struct MoodLog {
    entries: Vec<MoodEntry>,
    next_id: u64,
}

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from entries already logged, oldest first.
    pub fn with_entries(entries: Vec<MoodEntry>) -> Self {
        let next_id = entries
            .iter()
            .filter_map(|entry| entry.id.strip_prefix(ID_PREFIX)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { entries, next_id }
    }

    pub fn log(&mut self, mood: Mood, note: Option<&str>, logged_at: PrimitiveDateTime) -> MoodEntry {
        self.next_id += 1;
        let entry = MoodEntry {
            id: format!("{ID_PREFIX}{}", self.next_id),
            mood,
            logged_at,
            note: note
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        };

        self.entries.push(entry.clone());
        info!(
            "event=mood_logged module=mood status=ok id={} mood={}",
            entry.id, entry.mood
        );
        entry
    }

    /// Newest first; entries logged at the same instant keep reverse log order.
    pub fn newest_first(&self) -> Vec<MoodEntry> {
        let mut entries = self.entries.clone();
        entries.reverse();
        entries.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
