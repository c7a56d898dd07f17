//! Per-epic statistics and the 52-day activity bitmap.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::directive::{compute_directive_stats, DirectiveStats};
use crate::model::{Epic, Log};
use crate::time::date_key;

/// Number of days covered by [`EpicStats::commit_history`].
pub const COMMIT_HISTORY_DAYS: usize = 52;

/// Trailing window of the commit history used for `recent_density`.
pub const RECENT_WINDOW_DAYS: usize = 14;

/// Derived statistics for one epic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicStats {
    /// Sum of each directive's `days_active`. A day logged on two
    /// directives counts twice.
    pub total_days_invested: u32,
    pub total_hours_logged: f64,
    /// One flag per day, oldest first; the last entry is today.
    pub commit_history: Vec<u8>,
    /// Percentage (0-100) of active days in the last 14 days
    pub recent_density: u32,
}

/// Compute statistics for `epic` from the full log.
pub fn compute_epic_stats(epic: &Epic, logs: &[Log], as_of: DateTime<Utc>) -> EpicStats {
    let (total_days_invested, total_hours_logged) = epic
        .directives
        .iter()
        .map(|d| compute_directive_stats(d, logs, as_of))
        .fold((0, 0.0), |(days, hours), s: DirectiveStats| {
            (days + s.days_active, hours + s.hours_logged)
        });

    let commit_history = commit_history(&epic.id, logs, as_of);
    let recent_density = recent_density(&commit_history);

    EpicStats {
        total_days_invested,
        total_hours_logged,
        commit_history,
        recent_density,
    }
}

/// Activity flags for the epic over the 52 days ending on `as_of`'s day.
///
/// Matches logs by `epic_id` only, so a log against a directive that has
/// since been removed from the epic still counts.
pub fn commit_history(epic_id: &str, logs: &[Log], as_of: DateTime<Utc>) -> Vec<u8> {
    let active: HashSet<NaiveDate> = logs
        .iter()
        .filter(|l| l.epic_id == epic_id)
        .map(|l| date_key(l.timestamp))
        .collect();

    let today = date_key(as_of);
    (0..COMMIT_HISTORY_DAYS as i64)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            u8::from(active.contains(&day))
        })
        .collect()
}

/// Rounded percentage of active days in the trailing 14-day window.
pub fn recent_density(history: &[u8]) -> u32 {
    let start = history.len().saturating_sub(RECENT_WINDOW_DAYS);
    let active: u32 = history[start..].iter().map(|&d| u32::from(d)).sum();
    (f64::from(active) * 100.0 / RECENT_WINDOW_DAYS as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActivityType, CheckinInterval, Directive, LogSource, Phase};
    use chrono::TimeZone;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 30, 10, 0, 0).unwrap()
    }

    fn directive(id: &str) -> Directive {
        Directive {
            id: id.to_string(),
            name: id.to_string(),
            activity_type: ActivityType::Learn,
            interval: CheckinInterval::Weekly,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn epic(directives: Vec<Directive>) -> Epic {
        Epic {
            id: "epic_a".to_string(),
            name: "Reading".to_string(),
            emoji: "📖".to_string(),
            description: String::new(),
            phase: Phase::Active,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            deadline: None,
            target: None,
            directives,
        }
    }

    fn log(epic_id: &str, directive_id: &str, days_ago: i64, minutes: Option<u32>) -> Log {
        Log {
            id: format!("log_{directive_id}_{days_ago}"),
            epic_id: epic_id.to_string(),
            directive_id: directive_id.to_string(),
            timestamp: as_of() - Duration::days(days_ago),
            duration_minutes: minutes,
            note: String::new(),
            source: LogSource::Manual,
        }
    }

    #[test]
    fn test_empty_epic_has_zeroed_stats() {
        let stats = compute_epic_stats(&epic(vec![]), &[], as_of());
        assert_eq!(stats.total_days_invested, 0);
        assert_eq!(stats.total_hours_logged, 0.0);
        assert_eq!(stats.commit_history, vec![0; COMMIT_HISTORY_DAYS]);
        assert_eq!(stats.recent_density, 0);
    }

    #[test]
    fn test_days_invested_sums_per_directive_counts() {
        let e = epic(vec![directive("d1"), directive("d2")]);
        let logs = vec![
            log("epic_a", "d1", 0, Some(30)),
            log("epic_a", "d2", 0, Some(90)),
            log("epic_a", "d1", 3, None),
        ];

        let stats = compute_epic_stats(&e, &logs, as_of());
        // Today is counted once per directive
        assert_eq!(stats.total_days_invested, 3);
        assert!((stats.total_hours_logged - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_commit_history_places_today_last() {
        let e = epic(vec![directive("d1")]);
        let logs = vec![log("epic_a", "d1", 0, None), log("epic_a", "d1", 51, None)];

        let history = compute_epic_stats(&e, &logs, as_of()).commit_history;
        assert_eq!(history.len(), COMMIT_HISTORY_DAYS);
        assert_eq!(history[51], 1);
        assert_eq!(history[0], 1);
        assert_eq!(history.iter().map(|&d| d as u32).sum::<u32>(), 2);
    }

    #[test]
    fn test_commit_history_ignores_old_and_foreign_logs() {
        let logs = vec![
            log("epic_a", "d1", 52, None),
            log("epic_b", "d9", 1, None),
        ];
        let history = commit_history("epic_a", &logs, as_of());
        assert!(history.iter().all(|&d| d == 0));
    }

    #[test]
    fn test_commit_history_counts_logs_for_removed_directives() {
        let e = epic(vec![directive("d1")]);
        let logs = vec![log("epic_a", "retired", 2, None)];
        let stats = compute_epic_stats(&e, &logs, as_of());
        assert_eq!(stats.commit_history[49], 1);
        assert_eq!(stats.total_days_invested, 0);
    }

    #[test]
    fn test_recent_density_half() {
        let mut history = vec![0u8; COMMIT_HISTORY_DAYS];
        for slot in history.iter_mut().skip(COMMIT_HISTORY_DAYS - 14).step_by(2) {
            *slot = 1;
        }
        assert_eq!(recent_density(&history), 50);
    }

    #[test]
    fn test_recent_density_rounds() {
        let mut history = vec![0u8; COMMIT_HISTORY_DAYS];
        history[51] = 1;
        // 1/14 = 7.14%
        assert_eq!(recent_density(&history), 7);
        history[50] = 1;
        history[49] = 1;
        // 3/14 = 21.43%
        assert_eq!(recent_density(&history), 21);
        // Activity outside the window does not count
        history[0] = 1;
        assert_eq!(recent_density(&history), 21);
    }

    #[test]
    fn test_full_window_is_one_hundred() {
        let e = epic(vec![directive("d1")]);
        let logs: Vec<Log> = (0..14).map(|d| log("epic_a", "d1", d, None)).collect();
        assert_eq!(compute_epic_stats(&e, &logs, as_of()).recent_density, 100);
    }
}
