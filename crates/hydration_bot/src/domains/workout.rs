use serde::Serialize;

use crate::config::GoalConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WorkoutEffect {
    pub calories_burned: i64,
    pub extra_water_ml: i64,
}

/// Calories per minute for an activity label. Case-insensitive; labels
/// missing from the table use the configured default rate.
pub fn per_minute_rate(config: &GoalConfig, activity_type: &str) -> i64 {
    config
        .workout_calories_per_min
        .get(&activity_type.trim().to_lowercase())
        .copied()
        .unwrap_or(config.default_workout_rate)
}

/// Calories burned and extra water needed for `minutes` of `activity_type`.
pub fn workout_effect(config: &GoalConfig, activity_type: &str, minutes: u32) -> WorkoutEffect {
    let calories_burned = per_minute_rate(config, activity_type) * i64::from(minutes);
    let extra_water_ml = ((f64::from(minutes) / 30.0) * config.workout_water_per_30min) as i64;
    WorkoutEffect {
        calories_burned,
        extra_water_ml,
    }
}
