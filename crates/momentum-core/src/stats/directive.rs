//! Per-directive statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::overdue::is_overdue;
use crate::model::{Directive, Log};
use crate::time::date_key;

/// Derived statistics for one directive. Recompute on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveStats {
    /// Distinct calendar days with at least one log
    pub days_active: u32,
    /// Sum of logged durations, in hours
    pub hours_logged: f64,
    /// Timestamp of the most recent log
    pub last_checkin: Option<DateTime<Utc>>,
    pub is_overdue: bool,
}

/// Aggregate the logs that belong to `directive`.
///
/// Logs for other directives are ignored, so `logs` may be the full log.
pub fn compute_directive_stats(
    directive: &Directive,
    logs: &[Log],
    as_of: DateTime<Utc>,
) -> DirectiveStats {
    let mut days = HashSet::new();
    let mut minutes: u64 = 0;
    let mut last_checkin: Option<DateTime<Utc>> = None;

    for log in logs.iter().filter(|l| l.directive_id == directive.id) {
        days.insert(date_key(log.timestamp));
        minutes += u64::from(log.duration_minutes.unwrap_or(0));
        if last_checkin.map_or(true, |last| log.timestamp > last) {
            last_checkin = Some(log.timestamp);
        }
    }

    DirectiveStats {
        days_active: days.len() as u32,
        hours_logged: minutes as f64 / 60.0,
        last_checkin,
        is_overdue: is_overdue(last_checkin, &directive.interval, as_of),
    }
}
