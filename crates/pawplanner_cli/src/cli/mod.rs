use clap::{Parser, Subcommand};
use pawplanner_core::config::ConfigOverrides;
use pawplanner_core::error::AppError;
use pawplanner_core::status::OverdueGranularity;
use pawplanner_core::week::WeekStart;

#[derive(Parser, Debug)]
#[command(name = "pawplanner", author, version, about = "Pet care made simple", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List today's tasks with progress
    ///
    /// Example: pawplanner today
    Today,
    /// Show the 7-day calendar
    ///
    /// Example: pawplanner week
    /// Example: pawplanner week --offset -1
    /// Example: pawplanner week --date 2025-11-11
    Week {
        /// Weeks to page forward (negative pages back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
        /// Any day of the week to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Add a care task
    ///
    /// Example: pawplanner add "Evening walk" --type walk --date 2025-11-11 --time "7:00 PM"
    Add {
        title: Option<String>,
        /// feeding | walk | medication | other
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        task_type: Option<String>,
        /// Calendar day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Display time, e.g. "8:00 AM" or "18:30"
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark a task done, or reopen a completed one
    ///
    /// Example: pawplanner toggle task-3
    Toggle { id: String },
    /// Delete a task
    ///
    /// Example: pawplanner delete task-3
    Delete { id: String },
    /// Show details of a task
    ///
    /// Example: pawplanner show task-3
    Show { id: String },
    /// Log how your pet is feeling
    ///
    /// Example: pawplanner mood happy "Very playful today!"
    Mood { mood: String, note: Option<String> },
    /// List logged moods, newest first
    Moods,
    /// List upcoming appointments
    Appointments,
    /// List pets
    Pets,
    /// Add a pet profile
    ///
    /// Example: pawplanner add-pet Luna cat --breed Siamese --age 3
    AddPet {
        name: String,
        species: String,
        #[arg(long)]
        breed: Option<String>,
        #[arg(long)]
        age: Option<u8>,
    },
    /// Show today's progress and activity summary
    Stats,
    /// Walk through the pet care guide
    ///
    /// Example: pawplanner guide --step 2
    /// Example: pawplanner guide --complete personality
    Guide {
        /// Step to show (1-4)
        #[arg(long)]
        step: Option<usize>,
        /// Mark a step as done: personality | health | activity | nutrition
        #[arg(long, value_name = "STEP_ID")]
        complete: Option<String>,
    },
    /// Show the welcome message, or dismiss it for good
    ///
    /// Example: pawplanner welcome --dismiss
    Welcome {
        #[arg(long)]
        dismiss: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    PetName,
    WeekStart,
    OverdueGranularity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let canonical_field = canonicalize_flag_name(key_raw)
        .ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_field.as_str() {
        "theme" => ConfigOverrideTarget::Theme,
        "pet_name" | "pet" | "name" => ConfigOverrideTarget::PetName,
        "week_start" => ConfigOverrideTarget::WeekStart,
        "overdue_granularity" | "overdue" => ConfigOverrideTarget::OverdueGranularity,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` into one set of overrides; later values win.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::PetName => overrides.pet_name = Some(parsed.value),
            ConfigOverrideTarget::WeekStart => {
                overrides.week_start = Some(parsed.value.parse::<WeekStart>()?);
            }
            ConfigOverrideTarget::OverdueGranularity => {
                overrides.overdue_granularity = Some(parsed.value.parse::<OverdueGranularity>()?);
            }
        }
    }
    Ok(overrides)
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
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
        None
    } else {
        Some(trimmed.to_string())
    }
}
