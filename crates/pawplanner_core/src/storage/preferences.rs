use crate::error::AppError;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
pub const WELCOME_SEEN_KEY: &str = "pawplanner-welcome-seen";
const PREFS_FILE_NAME: &str = "preferences.json";
const PREFS_ENV_VAR: &str = "PAWPLANNER_PREFS_PATH";

/// Small key-value store for the few settings that outlive a session.
pub trait Preferences {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;
}

pub fn welcome_seen(prefs: &dyn Preferences) -> Result<bool, AppError> {
    Ok(prefs.get(WELCOME_SEEN_KEY)?.as_deref() == Some("true"))
}

pub fn mark_welcome_seen(prefs: &mut dyn Preferences) -> Result<(), AppError> {
    prefs.set(WELCOME_SEEN_KEY, "true")
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPreferences {
    schema_version: u32,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Preferences kept as a flat JSON object on disk. Every `set` rewrites the
/// file; a missing file reads as empty. A damaged file fails `get` but is
/// replaced by the next `set`.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(prefs_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Preferences for JsonFilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut values = load_values(&self.path)?;
        Ok(values.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let mut values = match load_values(&self.path) {
            Ok(values) => values,
            Err(err) => {
                warn!(
                    "event=preferences_load module=storage status=reset path={} code={} message={}",
                    self.path.display(),
                    err.code(),
                    err.message()
                );
                BTreeMap::new()
            }
        };
        values.insert(key.to_string(), value.to_string());
        save_values(&self.path, values)?;
        info!("event=preference_set module=storage status=ok key={key}");
        Ok(())
    }
}

pub fn prefs_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(PREFS_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("pawplanner")
            .join(PREFS_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("pawplanner")
            .join(PREFS_FILE_NAME))
    }
}

fn load_values(path: &Path) -> Result<BTreeMap<String, String>, AppError> {
    if !path.exists() {
        debug!(
            "event=preferences_load module=storage status=missing path={}",
            path.display()
        );
        return Ok(BTreeMap::new());
    }

    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(err.to_string()))?;
    let stored: StoredPreferences =
        serde_json::from_str(&content).map_err(|err| AppError::invalid_data(err.to_string()))?;

    if !(1..=SCHEMA_VERSION).contains(&stored.schema_version) {
        return Err(AppError::invalid_data("schema_version mismatch"));
    }

    Ok(stored.values)
}

fn save_values(path: &Path, values: BTreeMap<String, String>) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let stored = StoredPreferences {
        schema_version: SCHEMA_VERSION,
        values,
    };
    let content = serde_json::to_string_pretty(&stored)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| AppError::io(err.to_string()))?;
    }

    Ok(())
}
