//! Overdue policy per check-in interval.

use chrono::{DateTime, Utc};

use crate::model::CheckinInterval;
use crate::time::days_since;

impl CheckinInterval {
    /// Days without a check-in tolerated before a directive is overdue.
    ///
    /// `None` for [`CheckinInterval::Unknown`].
    pub fn overdue_threshold_days(&self) -> Option<i64> {
        match self {
            CheckinInterval::Daily => Some(1),
            CheckinInterval::Weekly => Some(7),
            CheckinInterval::Biweekly => Some(14),
            CheckinInterval::Monthly => Some(30),
            CheckinInterval::Unknown(_) => None,
        }
    }

    /// Looser threshold used when picking neglected directives to suggest.
    pub fn neglect_threshold_days(&self) -> Option<i64> {
        match self {
            CheckinInterval::Daily => Some(2),
            CheckinInterval::Weekly => Some(10),
            CheckinInterval::Biweekly => Some(18),
            CheckinInterval::Monthly => Some(40),
            CheckinInterval::Unknown(_) => None,
        }
    }
}

/// Whether a directive with this last check-in is overdue at `as_of`.
///
/// A directive that was never checked in is always overdue. With an
/// unrecognised interval it is never overdue once a check-in exists.
pub fn is_overdue(
    last_checkin: Option<DateTime<Utc>>,
    interval: &CheckinInterval,
    as_of: DateTime<Utc>,
) -> bool {
    let Some(last) = last_checkin else {
        return true;
    };
    match interval.overdue_threshold_days() {
        Some(threshold) => days_since(last, as_of) > threshold,
        None => false,
    }
}
