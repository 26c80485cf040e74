use crate::config::GoalConfig;

/// The only distinction the calorie formula makes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sex {
    Male,
    Other,
}

impl Sex {
    /// Total: "male" in any case is [`Sex::Male`], everything else is [`Sex::Other`].
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("male") {
            Sex::Male
        } else {
            Sex::Other
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(ActivityLevel::Low),
            "medium" => Some(ActivityLevel::Medium),
            "high" => Some(ActivityLevel::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Medium => "medium",
            ActivityLevel::High => "high",
        }
    }
}

/// Daily water target in millilitres, truncated toward zero.
///
/// `weight * ml_per_kg + (minutes / 30) * activity_water_per_30min`, plus the
/// hot-weather extra when the temperature is strictly above the threshold.
pub fn water_goal(
    config: &GoalConfig,
    weight_kg: f64,
    activity_minutes: u32,
    temperature_celsius: f64,
) -> i64 {
    let base = weight_kg * config.water_ml_per_kg;
    let activity = (f64::from(activity_minutes) / 30.0) * config.activity_water_per_30min;
    let extra = if temperature_celsius > config.hot_temp_threshold {
        config.hot_weather_extra
    } else {
        0.0
    };
    (base + activity + extra) as i64
}

/// Flat calorie bonus for an activity level label; unknown labels get 0.
///
/// The label must match a table key exactly: `"High"` is unknown. Callers
/// normalize user input through [`ActivityLevel::parse`] first.
pub fn activity_bonus(config: &GoalConfig, activity_level: &str) -> i64 {
    config
        .activity_calories
        .get(activity_level)
        .copied()
        .unwrap_or(0)
}

/// Mifflin-St Jeor basal metabolic rate.
///
/// `10 * weight + 6.25 * height - 5 * age`, then `+5` for men and `-161`
/// for everyone else.
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Other => base - 161.0,
    }
}

/// Daily calorie target: BMR plus the activity bonus, truncated toward zero.
pub fn calorie_goal(
    config: &GoalConfig,
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: &str,
    activity_level: &str,
) -> i64 {
    let bmr = basal_metabolic_rate(weight_kg, height_cm, age, Sex::from_label(sex));
    (bmr + activity_bonus(config, activity_level) as f64) as i64
}
