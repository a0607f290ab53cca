use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::PrimitiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    Happy,
    Calm,
    Energetic,
    LowEnergy,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Calm => "calm",
            Self::Energetic => "energetic",
            Self::LowEnergy => "low-energy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Calm => "Calm",
            Self::Energetic => "Energetic",
            Self::LowEnergy => "Low Energy",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|ch| match ch {
                '_' | ' ' => '-',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "happy" => Ok(Self::Happy),
            "calm" => Ok(Self::Calm),
            "energetic" => Ok(Self::Energetic),
            "low-energy" | "lowenergy" | "low" => Ok(Self::LowEnergy),
            "" => Err(AppError::invalid_input("mood is required")),
            other => Err(AppError::invalid_input(format!(
                "unknown mood '{other}'; expected happy|calm|energetic|low-energy"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub mood: Mood,
    pub logged_at: PrimitiveDateTime,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Mood;

    #[test]
    fn mood_accepts_spelling_variants() {
        assert_eq!("low-energy".parse::<Mood>().unwrap(), Mood::LowEnergy);
        assert_eq!("Low Energy".parse::<Mood>().unwrap(), Mood::LowEnergy);
        assert_eq!("low_energy".parse::<Mood>().unwrap(), Mood::LowEnergy);
        assert_eq!("HAPPY".parse::<Mood>().unwrap(), Mood::Happy);
    }

    #[test]
    fn mood_rejects_unknown_value() {
        let err = "grumpy".parse::<Mood>().unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        assert!(err.message().contains("grumpy"));
    }

    #[test]
    fn mood_serializes_kebab_case() {
        let value = serde_json::to_value(Mood::LowEnergy).unwrap();
        assert_eq!(value, "low-energy");
    }
}
