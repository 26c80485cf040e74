//! Conversational water and calorie tracker.
//!
//! [`HydrationBot`] ties the pure engine in [`domains`] to the providers of
//! `hydration_client`, the stores in [`store`] and the per-user dialogue
//! state in [`session`]. Front-ends hand it one text message at a time.

use std::sync::Arc;

use hydration_client::{FoodInfo, FoodLookup, TemperatureProvider};
use serde::Serialize;
use tracing::{debug, error, info};

pub mod config;
pub mod dialogue;
pub mod domains;
pub mod error;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

pub use config::{BotConfig, GoalConfig};
pub use error::{BotError, BotResult, ValidationError, ValidationErrorKind};
pub use types::{LoggedEvent, Profile, ProgressSnapshot};

use dialogue::Command;
use domains::{ActivityLevel, WorkoutEffect};
use session::{DialogueState, SessionRegistry};
use store::{EventLog, ProfileStore};
use types::{EventCategory, FoodEvent, WaterEvent, WaterProgress, WorkoutEvent};

const HELP_TEXT: &str = "👋 Ready! Commands:\n\
/profile - set your profile\n\
/water - daily water goal\n\
/calories - daily calorie goal\n\
/log_water <ml> - log water\n\
/log_food <product> - log food\n\
/log_workout <type> <min> - log a workout\n\
/check_progress - today's progress";

const PROFILE_PROMPT: &str =
    "Enter your profile as: sex;age;weight(kg);height(cm)\nExample: male;30;75;180";

/// Water goal for a city and planned activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterGoalReport {
    pub temperature_celsius: f64,
    pub goal_ml: i64,
}

/// Outcome of `/log_water`: the amount, plus progress when a profile exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterLogReport {
    pub amount_ml: u32,
    pub progress: Option<WaterProgress>,
}

/// A logged meal and the weight it was entered with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealReport {
    pub grams: f64,
    pub event: FoodEvent,
}

#[derive(Clone)]
pub struct HydrationBot {
    config: Arc<GoalConfig>,
    temperature: Arc<dyn TemperatureProvider>,
    food: Arc<dyn FoodLookup>,
    profiles: Arc<dyn ProfileStore>,
    events: Arc<dyn EventLog>,
    sessions: Arc<SessionRegistry>,
}

impl HydrationBot {
    pub fn new(
        config: GoalConfig,
        temperature: Arc<dyn TemperatureProvider>,
        food: Arc<dyn FoodLookup>,
        profiles: Arc<dyn ProfileStore>,
        events: Arc<dyn EventLog>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            temperature,
            food,
            profiles,
            events,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    /// Handle one message and return the reply text. Never fails: errors are
    /// rendered as replies.
    pub async fn handle_message(&self, user_id: &str, text: &str, today: &str) -> String {
        match self.dispatch(user_id, text, today).await {
            Ok(reply) => reply,
            Err(e) => {
                match &e {
                    BotError::Storage(_) | BotError::Io(_) | BotError::Serialization(_) => {
                        error!(user_id, "message handling failed: {e}")
                    }
                    _ => debug!(user_id, "message rejected: {e}"),
                }
                render_error(&e)
            }
        }
    }

    async fn dispatch(&self, user_id: &str, text: &str, today: &str) -> BotResult<String> {
        // a pending food entry only survives until the next message
        if let DialogueState::AwaitingGrams {
            product_name,
            kcal_per_100g,
        } = self.sessions.take(user_id).await
        {
            // profile text still updates the profile, as a slash command would
            let interrupts = Command::is_slash_command(text)
                || matches!(Command::parse(text), Command::ProfileText(_));
            if !interrupts {
                let meal = self
                    .finish_food_entry(user_id, &product_name, kcal_per_100g, text, today)
                    .await?;
                return Ok(format!(
                    "✅ Logged: {:.1} kcal from {:.0} g of {}",
                    meal.event.kcal, meal.grams, meal.event.name
                ));
            }
            debug!(user_id, "pending food entry for {product_name} dropped");
        }

        let reply = match Command::parse(text) {
            Command::Start => HELP_TEXT.to_string(),
            Command::ProfilePrompt => PROFILE_PROMPT.to_string(),
            Command::ProfileText(raw) => {
                self.save_profile(user_id, &raw).await?;
                "✅ Profile saved!".to_string()
            }
            Command::WaterPrompt => {
                self.require_profile(user_id).await?;
                "Enter: city;minutes of activity\nExample: Tashkent;45".to_string()
            }
            Command::WaterQuery { city, minutes } => {
                let report = self.water_goal_for_city(user_id, &city, minutes).await?;
                format!(
                    "🌡 Temperature: {:.1}°C\n💧 Water goal: {} ml",
                    report.temperature_celsius, report.goal_ml
                )
            }
            Command::CaloriesPrompt => {
                self.require_profile(user_id).await?;
                "Enter activity level: low, medium, high".to_string()
            }
            Command::ActivityLevel(level) => {
                let kcal = self.calorie_goal_for(user_id, level.as_str()).await?;
                format!("🔥 Your calorie goal: {kcal} kcal")
            }
            Command::LogWater(ml) => {
                let report = self.log_water(user_id, ml, today).await?;
                match report.progress {
                    Some(p) => format!("✅ Logged {ml} ml. Remaining: {} ml", p.remaining_ml()),
                    None => format!("✅ Logged {ml} ml."),
                }
            }
            Command::LogFood(product) => {
                let info = self.start_food_entry(user_id, &product).await?;
                if info.is_found() {
                    format!(
                        "🍎 {} - {} kcal/100g. How many grams?",
                        info.name, info.kcal_per_100g
                    )
                } else {
                    "❌ Product not found".to_string()
                }
            }
            Command::LogWorkout {
                activity_type,
                minutes,
            } => {
                let effect = self
                    .log_workout(user_id, &activity_type, minutes, today)
                    .await?;
                format!(
                    "🏃 {activity_type} - {minutes} min - {} kcal. Extra water: {} ml",
                    effect.calories_burned, effect.extra_water_ml
                )
            }
            Command::CheckProgress => {
                let snap = self.progress(user_id, today).await?;
                format!(
                    "📊 Today's progress:\n\
                     💧 Water: {} ml of {} ml\n\
                     🔥 Calories: eaten {:.1} kcal, burned {} kcal\n\
                     ⚖️ Balance: {:.1} kcal",
                    snap.water.drunk_ml,
                    snap.water.goal_ml,
                    snap.calories.eaten,
                    snap.calories.burned,
                    snap.calories.balance()
                )
            }
            Command::Usage(usage) => usage.to_string(),
            Command::Unknown => "🤔 Unknown command. Use /start for the list of commands.".to_string(),
        };
        Ok(reply)
    }

    /// Validate profile text and store it, replacing any previous profile.
    pub async fn save_profile(&self, user_id: &str, raw: &str) -> BotResult<Profile> {
        let profile = domains::validate(raw)?;
        self.profiles.set_profile(user_id, profile.clone()).await?;
        info!(user_id, "profile saved");
        Ok(profile)
    }

    pub async fn require_profile(&self, user_id: &str) -> BotResult<Profile> {
        self.profiles
            .get_profile(user_id)
            .await?
            .ok_or_else(|| BotError::ProfileMissing(user_id.to_string()))
    }

    /// Water goal for today's weather in `city` and `minutes` of activity.
    /// Provider failures propagate unchanged.
    pub async fn water_goal_for_city(
        &self,
        user_id: &str,
        city: &str,
        minutes: u32,
    ) -> BotResult<WaterGoalReport> {
        let profile = self.require_profile(user_id).await?;
        let temperature_celsius = self.temperature.current_temperature(city).await?;
        let goal_ml = domains::water_goal(&self.config, profile.weight_kg, minutes, temperature_celsius);
        Ok(WaterGoalReport {
            temperature_celsius,
            goal_ml,
        })
    }

    pub async fn calorie_goal_for(&self, user_id: &str, activity_level: &str) -> BotResult<i64> {
        let profile = self.require_profile(user_id).await?;
        Ok(self.calorie_goal(&profile, activity_level))
    }

    fn calorie_goal(&self, profile: &Profile, activity_level: &str) -> i64 {
        domains::calorie_goal(
            &self.config,
            profile.weight_kg,
            profile.height_cm,
            profile.age,
            &profile.sex,
            activity_level,
        )
    }

    /// Water goal used for progress: no planned activity, not a hot day.
    fn neutral_water_goal(&self, profile: &Profile) -> i64 {
        domains::water_goal(&self.config, profile.weight_kg, 0, self.config.hot_temp_threshold)
    }

    pub async fn log_water(
        &self,
        user_id: &str,
        amount_ml: u32,
        today: &str,
    ) -> BotResult<WaterLogReport> {
        self.record(
            user_id,
            LoggedEvent::Water(WaterEvent {
                date: today.to_string(),
                amount_ml,
            }),
        )
        .await?;

        let progress = match self.profiles.get_profile(user_id).await? {
            Some(profile) => {
                let events = self
                    .events
                    .read_today(user_id, EventCategory::Water, today)
                    .await?;
                let snap = domains::aggregate(&events, today, self.neutral_water_goal(&profile), 0);
                Some(snap.water)
            }
            None => None,
        };
        Ok(WaterLogReport {
            amount_ml,
            progress,
        })
    }

    /// Look up a product; when found, the next message is taken as grams.
    pub async fn start_food_entry(&self, user_id: &str, product: &str) -> BotResult<FoodInfo> {
        let info = self.food.find_food(product).await?;
        if info.is_found() {
            self.sessions
                .set(
                    user_id,
                    DialogueState::AwaitingGrams {
                        product_name: info.name.clone(),
                        kcal_per_100g: info.kcal_per_100g,
                    },
                )
                .await;
        } else {
            debug!(user_id, product, "food lookup found nothing");
        }
        Ok(info)
    }

    /// Convert the grams answer into calories and log the meal.
    pub async fn finish_food_entry(
        &self,
        user_id: &str,
        product_name: &str,
        kcal_per_100g: f64,
        grams_text: &str,
        today: &str,
    ) -> BotResult<MealReport> {
        let grams = grams_text
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|g| g.is_finite() && *g >= 0.0)
            .ok_or_else(|| ValidationError::malformed_amount("Enter the amount in grams!"))?;
        let event = FoodEvent {
            date: today.to_string(),
            name: product_name.to_string(),
            kcal: grams * kcal_per_100g / 100.0,
        };
        self.record(user_id, LoggedEvent::Food(event.clone())).await?;
        Ok(MealReport { grams, event })
    }

    pub async fn log_workout(
        &self,
        user_id: &str,
        activity_type: &str,
        minutes: u32,
        today: &str,
    ) -> BotResult<WorkoutEffect> {
        let effect = domains::workout_effect(&self.config, activity_type, minutes);
        self.record(
            user_id,
            LoggedEvent::Workout(WorkoutEvent {
                date: today.to_string(),
                activity_type: activity_type.to_string(),
                minutes,
                kcal: effect.calories_burned,
                water_ml: effect.extra_water_ml,
            }),
        )
        .await?;
        Ok(effect)
    }

    /// Today's snapshot against the neutral water goal and the `medium`
    /// calorie goal.
    pub async fn progress(&self, user_id: &str, today: &str) -> BotResult<ProgressSnapshot> {
        let profile = self.require_profile(user_id).await?;
        let mut events = Vec::new();
        for category in EventCategory::ALL {
            events.extend(self.events.read_today(user_id, category, today).await?);
        }
        Ok(domains::aggregate(
            &events,
            today,
            self.neutral_water_goal(&profile),
            self.calorie_goal(&profile, ActivityLevel::Medium.as_str()),
        ))
    }

    async fn record(&self, user_id: &str, event: LoggedEvent) -> BotResult<()> {
        let category = event.category();
        self.events.append(user_id, event).await?;
        metrics::counter!("events_logged_total", "category" => category.as_str()).increment(1);
        info!(user_id, %category, "event logged");
        Ok(())
    }
}

fn render_error(e: &BotError) -> String {
    match e {
        BotError::ProfileMissing(_) => "Set your profile first with /profile".to_string(),
        BotError::Validation(v) => match v.kind {
            ValidationErrorKind::MalformedProfile => {
                format!("⚠️ Could not read the profile ({}).\n{PROFILE_PROMPT}", v.detail)
            }
            ValidationErrorKind::MalformedAmount => v.detail.clone(),
        },
        BotError::Provider(p) => format!("⚠️ Lookup failed: {p}"),
        BotError::Storage(_) | BotError::Io(_) | BotError::Serialization(_) => {
            "⚠️ Internal error, please try again later.".to_string()
        }
    }
}
