//! Date helpers. Log dates are plain `YYYY-MM-DD` strings compared by equality.

use chrono::{Local, NaiveDate};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Today in the local timezone, as stored in the log.
pub fn today_local() -> String {
    format_day(Local::now().date_naive())
}
