pub mod preferences;

pub use preferences::{
    JsonFilePreferences, MemoryPreferences, Preferences, WELCOME_SEEN_KEY, mark_welcome_seen,
    welcome_seen,
};
