//! Time utilities: parsing HH:MM, formatting minutes and hours.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_time_or_err(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// 465 → "7.75", the two-decimal hours figure used in notification bodies.
pub fn minutes_as_hours(mins: i64) -> String {
    format!("{:.2}", mins as f64 / 60.0)
}
