use crate::error::AppError;
use crate::status::OverdueGranularity;
use crate::week::WeekStart;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "PAWPLANNER_CONFIG_PATH";
pub const DEFAULT_PET_NAME: &str = "Max";

#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub alert: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        paint(self.accent, self.reset, text)
    }

    pub fn mutedize(&self, text: &str) -> String {
        paint(self.muted, self.reset, text)
    }

    pub fn alertize(&self, text: &str) -> String {
        paint(self.alert, self.reset, text)
    }
}

fn paint(color: &str, reset: &str, text: &str) -> String {
    if color.is_empty() {
        text.to_string()
    } else {
        format!("{color}{text}{reset}")
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.and_then(canonical_theme_name).as_deref() {
        Some("noir") => Palette {
            accent: "\x1b[38;5;208m",
            muted: "\x1b[38;5;250m",
            alert: "\x1b[38;5;203m",
            reset: "\x1b[0m",
        },
        Some("meadow") => Palette {
            accent: "\x1b[38;5;108m",
            muted: "\x1b[38;5;250m",
            alert: "\x1b[38;5;167m",
            reset: "\x1b[0m",
        },
        _ => Palette {
            accent: "",
            muted: "",
            alert: "",
            reset: "",
        },
    }
}

pub fn canonical_theme_name(raw: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        return Some("default".into());
    }

    match trimmed {
        "vanilla" | "light" => Some("default".to_string()),
        "dark" | "dark_mode" | "darkmode" => Some("noir".to_string()),
        "green" | "garden" => Some("meadow".to_string()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub pet_name: Option<String>,
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default)]
    pub overdue_granularity: OverdueGranularity,
}

impl Config {
    pub fn pet_name(&self) -> &str {
        self.pet_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_PET_NAME)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<String>,
    pub pet_name: Option<String>,
    pub week_start: Option<WeekStart>,
    pub overdue_granularity: Option<OverdueGranularity>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("pawplanner")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("pawplanner")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => {
            log::warn!(
                "event=config_load module=config status=error path={} code={}",
                path.display(),
                err.code()
            );
            ConfigLoad {
                config: Config::default(),
                error: Some(err),
            }
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.theme = config.theme.and_then(|name| canonical_theme_name(&name));
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_ref()
        && let Some(normalized) = canonical_theme_name(theme)
    {
        merged.theme = Some(normalized);
    }
    if let Some(pet_name) = overrides.pet_name.as_ref() {
        merged.pet_name = Some(pet_name.clone());
    }
    if let Some(week_start) = overrides.week_start {
        merged.week_start = week_start;
    }
    if let Some(granularity) = overrides.overdue_granularity {
        merged.overdue_granularity = granularity;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::{
        Config, ConfigOverrides, DEFAULT_PET_NAME, canonical_theme_name, load_config_from_path,
        load_config_with_fallback_from_path, merge_overrides, palette_for_theme,
    };
    use crate::status::OverdueGranularity;
    use crate::week::WeekStart;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("pawplanner-{nanos}-{file_name}"))
    }

    #[test]
    fn load_config_missing_returns_defaults_without_error() {
        let path = temp_path("missing-config.json");
        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn load_config_invalid_returns_defaults_and_error() {
        let path = temp_path("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert_eq!(result.config, Config::default());
        assert_eq!(result.error.map(|err| err.code()), Some("invalid_data"));
    }

    #[test]
    fn load_config_reads_valid_file() {
        let path = temp_path("valid-config.json");
        let content = serde_json::json!({
            "theme": "Dark Mode",
            "pet_name": "Biscuit",
            "week_start": "monday",
            "overdue_granularity": "date"
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.theme.as_deref(), Some("noir"));
        assert_eq!(loaded.pet_name(), "Biscuit");
        assert_eq!(loaded.week_start, WeekStart::Monday);
        assert_eq!(loaded.overdue_granularity, OverdueGranularity::Date);
    }

    #[test]
    fn defaults_match_the_dashboard() {
        let config = Config::default();

        assert_eq!(config.pet_name(), DEFAULT_PET_NAME);
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert_eq!(config.overdue_granularity, OverdueGranularity::TimeOfDay);
    }

    #[test]
    fn blank_pet_name_falls_back_to_default() {
        let config = Config {
            pet_name: Some("   ".into()),
            ..Config::default()
        };

        assert_eq!(config.pet_name(), DEFAULT_PET_NAME);
    }

    #[test]
    fn merge_overrides_replaces_only_given_fields() {
        let base = Config {
            theme: Some("default".into()),
            pet_name: Some("Max".into()),
            week_start: WeekStart::Sunday,
            overdue_granularity: OverdueGranularity::TimeOfDay,
        };
        let overrides = ConfigOverrides {
            theme: Some("dark".into()),
            week_start: Some(WeekStart::Monday),
            ..ConfigOverrides::default()
        };

        let merged = merge_overrides(&base, &overrides);

        assert_eq!(merged.theme.as_deref(), Some("noir"));
        assert_eq!(merged.pet_name(), "Max");
        assert_eq!(merged.week_start, WeekStart::Monday);
        assert_eq!(merged.overdue_granularity, OverdueGranularity::TimeOfDay);
        assert_eq!(base.week_start, WeekStart::Sunday);
    }

    #[test]
    fn merge_overrides_with_empty_overrides_returns_clone() {
        let base = Config {
            theme: Some("meadow".into()),
            ..Config::default()
        };

        assert_eq!(merge_overrides(&base, &ConfigOverrides::default()), base);
    }

    #[test]
    fn canonical_theme_name_maps_variants() {
        assert_eq!(canonical_theme_name("Vanilla"), Some("default".into()));
        assert_eq!(canonical_theme_name("Noir"), Some("noir".into()));
        assert_eq!(canonical_theme_name("garden"), Some("meadow".into()));
        assert_eq!(canonical_theme_name("dark-mode"), Some("noir".into()));
        assert_eq!(canonical_theme_name("  "), Some("default".into()));
    }

    #[test]
    fn palette_for_theme_returns_palette() {
        let default_palette = palette_for_theme(Some("vanilla"));
        assert!(default_palette.accent.is_empty());
        assert_eq!(default_palette.alertize("late"), "late");

        let noir_palette = palette_for_theme(Some("noir"));
        assert_eq!(noir_palette.accent, "\x1b[38;5;208m");
        assert_eq!(noir_palette.accentize("Max"), "\x1b[38;5;208mMax\x1b[0m");

        assert!(palette_for_theme(Some("oceanic")).accent.is_empty());
        assert!(palette_for_theme(None).muted.is_empty());
    }
}
