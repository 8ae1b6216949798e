/// Utility functions
use crate::errors::FormatError;
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Single-character weekday names, Monday first
const JP_WEEKDAYS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// Append the weekday to a `YYYY-MM-DD` date, e.g. `2026-01-13（火）`
pub fn format_date_with_weekday(date: &str) -> Result<String, FormatError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|source| FormatError {
        input: date.to_string(),
        source,
    })?;
    let weekday = JP_WEEKDAYS[parsed.weekday().num_days_from_monday() as usize];
    Ok(format!("{}（{}）", date, weekday))
}

/// Convert epoch seconds to a UTC timestamp
pub fn utc_from_epoch(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
}

/// Epoch seconds as `HH:MM` in UTC
pub fn epoch_to_hhmm(secs: i64) -> Option<String> {
    utc_from_epoch(secs).map(|dt| dt.format("%H:%M").to_string())
}

/// Epoch seconds as the UTC calendar date `YYYY-MM-DD`
pub fn epoch_to_date(secs: i64) -> Option<String> {
    utc_from_epoch(secs).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Date part of a `YYYY-MM-DD HH:MM:SS` timestamp
pub fn date_part(dt_txt: &str) -> &str {
    dt_txt.split(' ').next().unwrap_or(dt_txt)
}

/// Round to the nearest integer, ties to even
pub fn round_int(v: f64) -> i64 {
    v.round_ties_even() as i64
}

/// Round to one decimal place, ties to even
///
/// Goes through the decimal text so the exact binary value is rounded,
/// not the inexact product `v * 10`.
pub fn round1(v: f64) -> f64 {
    format!("{:.1}", v).parse().unwrap_or(v)
}
