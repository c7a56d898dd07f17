//! Day arithmetic shared by the statistics layer.
//!
//! Every function takes the reference instant explicitly; nothing in this
//! crate reads the wall clock except the CLI entry points.

use chrono::{DateTime, NaiveDate, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole 24-hour days elapsed from `instant` to `as_of`, rounded down.
///
/// Instants in the future of `as_of` give a negative count; callers decide
/// what that means.
pub fn days_since(instant: DateTime<Utc>, as_of: DateTime<Utc>) -> i64 {
    (as_of - instant).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Calendar day (UTC) an instant falls on. Formats as `YYYY-MM-DD`.
pub fn date_key(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Whole days from `as_of` until midnight UTC of `deadline`, rounded down.
pub fn days_until(deadline: NaiveDate, as_of: DateTime<Utc>) -> i64 {
    let deadline_start = deadline.and_time(chrono::NaiveTime::MIN).and_utc();
    (deadline_start - as_of)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}
