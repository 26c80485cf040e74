//! Recognition of incoming text messages.
//!
//! Slash commands are matched by name; free text is tried as a profile
//! (`sex;age;weight;height`), then as a water query (`city;minutes`), then as
//! an activity level. Anything else is [`Command::Unknown`].

use std::sync::LazyLock;

use regex::Regex;

use crate::domains::ActivityLevel;

static PROFILE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^;/][^;]*(;[^;]*){3}$").expect("valid profile regex"));

static WATER_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^;/][^;]*);([^;]*)$").expect("valid water query regex"));

pub const USAGE_LOG_WATER: &str = "⚠️ Usage: /log_water <ml>";
pub const USAGE_LOG_FOOD: &str = "⚠️ Usage: /log_food <product>";
pub const USAGE_LOG_WORKOUT: &str = "⚠️ Usage: /log_workout <type> <minutes>";
pub const USAGE_WATER_QUERY: &str = "⚠️ Enter: city;minutes of activity\nExample: Tashkent;45";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    ProfilePrompt,
    WaterPrompt,
    CaloriesPrompt,
    LogWater(u32),
    LogFood(String),
    LogWorkout { activity_type: String, minutes: u32 },
    CheckProgress,
    /// Free text shaped like a profile; validated later.
    ProfileText(String),
    WaterQuery { city: String, minutes: u32 },
    ActivityLevel(ActivityLevel),
    /// A known command with bad arguments; carries the usage line.
    Usage(&'static str),
    Unknown,
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.starts_with('/') {
            return Self::parse_slash(text);
        }
        if PROFILE_TEXT.is_match(text) {
            return Command::ProfileText(text.to_string());
        }
        if let Some(caps) = WATER_QUERY.captures(text) {
            let city = caps[1].trim();
            return match caps[2].trim().parse::<u32>() {
                Ok(minutes) if !city.is_empty() => Command::WaterQuery {
                    city: city.to_string(),
                    minutes,
                },
                _ => Command::Usage(USAGE_WATER_QUERY),
            };
        }
        if let Some(level) = ActivityLevel::parse(text) {
            return Command::ActivityLevel(level);
        }
        Command::Unknown
    }

    fn parse_slash(text: &str) -> Self {
        let mut parts = text.splitn(2, char::is_whitespace);
        let head = parts.next().unwrap_or_default();
        let rest = parts.next().map(str::trim).unwrap_or_default();
        // "/cmd@BotName" addresses a specific bot in group chats
        let name = head.split('@').next().unwrap_or(head);

        match name {
            "/start" | "/help" => Command::Start,
            "/profile" => Command::ProfilePrompt,
            "/water" => Command::WaterPrompt,
            "/calories" => Command::CaloriesPrompt,
            "/check_progress" => Command::CheckProgress,
            "/log_water" => match rest.parse::<u32>() {
                Ok(ml) => Command::LogWater(ml),
                Err(_) => Command::Usage(USAGE_LOG_WATER),
            },
            "/log_food" if !rest.is_empty() => Command::LogFood(rest.to_string()),
            "/log_food" => Command::Usage(USAGE_LOG_FOOD),
            "/log_workout" => {
                let args: Vec<&str> = rest.split_whitespace().collect();
                match args.as_slice() {
                    [activity_type, minutes] => match minutes.parse::<u32>() {
                        Ok(minutes) => Command::LogWorkout {
                            activity_type: activity_type.to_string(),
                            minutes,
                        },
                        Err(_) => Command::Usage(USAGE_LOG_WORKOUT),
                    },
                    _ => Command::Usage(USAGE_LOG_WORKOUT),
                }
            }
            _ => Command::Unknown,
        }
    }

    pub fn is_slash_command(text: &str) -> bool {
        text.trim_start().starts_with('/')
    }
}
