//! Utility functions for the ladder engine

use chrono::{DateTime, NaiveDate, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Get the current UTC calendar date
pub fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// Number of whole days between a player's last activity and `today`.
/// Future-dated activity counts as zero days of inactivity.
pub fn days_inactive(last_active: NaiveDate, today: NaiveDate) -> i64 {
    (today - last_active).num_days().max(0)
}

/// Calculate the absolute difference between two ratings
pub fn rating_difference(rating1: i32, rating2: i32) -> i32 {
    (rating1 - rating2).abs()
}
