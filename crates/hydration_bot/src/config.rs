use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BotError, BotResult};

/// Tunable constants of the goal and workout formulas.
///
/// Passed explicitly into every engine function; nothing in the engine reads
/// ambient state. Table keys are stored lowercase; workout lookups lowercase
/// their input, activity-level lookups match exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    /// Baseline water per kilogram of body weight (ml).
    pub water_ml_per_kg: f64,
    /// Extra water per 30 minutes of planned activity (ml).
    pub activity_water_per_30min: f64,
    /// Temperatures strictly above this are "hot" (°C).
    pub hot_temp_threshold: f64,
    /// Extra water on hot days (ml).
    pub hot_weather_extra: f64,
    /// Flat calorie bonus per activity level.
    pub activity_calories: BTreeMap<String, i64>,
    /// Workout calories burned per minute, by activity label.
    pub workout_calories_per_min: BTreeMap<String, i64>,
    /// Rate used for workout labels missing from the table.
    pub default_workout_rate: i64,
    /// Extra water per 30 minutes of logged workout (ml).
    pub workout_water_per_30min: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        let activity_calories = [("low", 150), ("medium", 300), ("high", 400)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let workout_calories_per_min = [
            ("бег", 10),
            ("сила", 8),
            ("йога", 4),
            ("run", 10),
            ("strength", 8),
            ("yoga", 4),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self {
            water_ml_per_kg: 30.0,
            activity_water_per_30min: 500.0,
            hot_temp_threshold: 25.0,
            hot_weather_extra: 800.0,
            activity_calories,
            workout_calories_per_min,
            default_workout_rate: 5,
            workout_water_per_30min: 200.0,
        }
    }
}

impl GoalConfig {
    /// Load overrides from a JSON file; absent fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> BotResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> BotResult<Self> {
        let cfg: GoalConfig = serde_json::from_str(raw)?;
        Ok(cfg.normalized())
    }

    /// Lowercase every table key.
    pub fn normalized(mut self) -> Self {
        self.activity_calories = lowercase_keys(self.activity_calories);
        self.workout_calories_per_min = lowercase_keys(self.workout_calories_per_min);
        self
    }
}

fn lowercase_keys(table: BTreeMap<String, i64>) -> BTreeMap<String, i64> {
    table
        .into_iter()
        .map(|(k, v)| (k.trim().to_lowercase(), v))
        .collect()
}

/// Process-level settings for the bot binary.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub data_path: PathBuf,
    pub goals_path: Option<PathBuf>,
    pub user_id: String,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let data_path = get("HYDRATION_BOT_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("users.json"));
        let goals_path = get("HYDRATION_BOT_GOALS_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let user_id = get("HYDRATION_BOT_USER")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "local".to_string());
        Self {
            data_path,
            goals_path,
            user_id,
        }
    }

    /// The goal configuration, from the override file when one is set.
    pub fn goal_config(&self) -> BotResult<GoalConfig> {
        match &self.goals_path {
            Some(path) => GoalConfig::from_file(path).map_err(|e| {
                BotError::Storage(format!("cannot load goals from {}: {e}", path.display()))
            }),
            None => Ok(GoalConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GoalConfig::from_json(r#"{"hot_weather_extra": 1000, "activity_calories": {"LOW": 100}}"#)
            .expect("cfg");
        assert_eq!(cfg.hot_weather_extra, 1000.0);
        assert_eq!(cfg.water_ml_per_kg, 30.0);
        assert_eq!(cfg.activity_calories.get("low"), Some(&100));
        assert!(cfg.activity_calories.get("medium").is_none());
        assert_eq!(cfg.default_workout_rate, 5);
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        let res = GoalConfig::from_json("{not json");
        assert!(matches!(res, Err(BotError::Serialization(_))));
    }

    #[test]
    fn bot_config_defaults() {
        let cfg = BotConfig::from_env_with(|_| None);
        assert_eq!(cfg.data_path, PathBuf::from("users.json"));
        assert!(cfg.goals_path.is_none());
        assert_eq!(cfg.user_id, "local");
        assert_eq!(cfg.goal_config().unwrap(), GoalConfig::default());
    }

    #[test]
    fn bot_config_reads_values() {
        let get = |k: &str| match k {
            "HYDRATION_BOT_DATA_PATH" => Some("/tmp/data.json".into()),
            "HYDRATION_BOT_GOALS_PATH" => Some("/tmp/goals.json".into()),
            "HYDRATION_BOT_USER" => Some("42".into()),
            _ => None,
        };
        let cfg = BotConfig::from_env_with(get);
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/data.json"));
        assert_eq!(cfg.goals_path, Some(PathBuf::from("/tmp/goals.json")));
        assert_eq!(cfg.user_id, "42");
    }

    #[test]
    fn missing_goals_file_is_reported() {
        let get = |k: &str| match k {
            "HYDRATION_BOT_GOALS_PATH" => Some("/nonexistent/goals.json".into()),
            _ => None,
        };
        let cfg = BotConfig::from_env_with(get);
        assert!(matches!(cfg.goal_config(), Err(BotError::Storage(_))));
    }
}
