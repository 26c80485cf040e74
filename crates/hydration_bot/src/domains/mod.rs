//! The engine: pure, synchronous functions over profiles and event logs.
//!
//! # Modules
//!
//! - [`goals`]: daily water and calorie targets
//! - [`workout`]: calories burned and extra water for a workout
//! - [`progress`]: today's totals against the goals
//! - [`profile`]: parsing and validation of profile text
//!
//! Nothing here performs I/O or touches shared state; every constant comes
//! in through [`GoalConfig`](crate::config::GoalConfig).

pub mod goals;
pub mod profile;
pub mod progress;
pub mod workout;

pub use goals::{ActivityLevel, Sex, calorie_goal, water_goal};
pub use profile::validate;
pub use progress::aggregate;
pub use workout::{WorkoutEffect, workout_effect};
