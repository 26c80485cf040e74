use std::fmt;

use serde::{Deserialize, Serialize};

/// Biometric profile of one user. Replaced wholesale, never patched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Free-form label; only "male" (any case) is treated specially.
    pub sex: String,
    pub age: u32,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(rename = "height")]
    pub height_cm: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Water,
    Food,
    Workout,
}

impl EventCategory {
    pub const ALL: [EventCategory; 3] = [
        EventCategory::Water,
        EventCategory::Food,
        EventCategory::Workout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Water => "water",
            EventCategory::Food => "food",
            EventCategory::Workout => "workout",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterEvent {
    pub date: String, // YYYY-MM-DD
    #[serde(rename = "amount")]
    pub amount_ml: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodEvent {
    pub date: String,
    pub name: String,
    pub kcal: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEvent {
    pub date: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub minutes: u32,
    pub kcal: i64,
    #[serde(rename = "water")]
    pub water_ml: i64,
}

/// One append-only entry of a user's log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum LoggedEvent {
    Water(WaterEvent),
    Food(FoodEvent),
    Workout(WorkoutEvent),
}

impl LoggedEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            LoggedEvent::Water(_) => EventCategory::Water,
            LoggedEvent::Food(_) => EventCategory::Food,
            LoggedEvent::Workout(_) => EventCategory::Workout,
        }
    }

    pub fn date(&self) -> &str {
        match self {
            LoggedEvent::Water(e) => &e.date,
            LoggedEvent::Food(e) => &e.date,
            LoggedEvent::Workout(e) => &e.date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WaterProgress {
    pub drunk_ml: u64,
    pub goal_ml: i64,
}

impl WaterProgress {
    /// Millilitres still to drink; negative once the goal is exceeded.
    pub fn remaining_ml(&self) -> i64 {
        self.goal_ml - self.drunk_ml as i64
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalorieProgress {
    pub eaten: f64,
    pub burned: i64,
    pub goal: i64,
}

impl CalorieProgress {
    /// Net energy balance, eaten minus burned.
    pub fn balance(&self) -> f64 {
        self.eaten - self.burned as f64
    }
}

/// Today's totals against freshly computed goals. Never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub water: WaterProgress,
    pub calories: CalorieProgress,
}
