//! Suggested next actions.
//!
//! Picks a short list mixing directives that have gone quiet ("neglected")
//! with directives that have been worked on the most ("momentum").
//! Neglected items always come first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Directive, Epic, Log};
use crate::stats::{compute_directive_stats, DirectiveStats};
use crate::time::days_since;

/// Default length of the suggestion list.
pub const DEFAULT_MAX_ACTIONS: usize = 4;

/// At most this many neglected directives are suggested.
pub const MAX_NEGLECTED: usize = 2;

/// A directive needs more than this many active days to count as momentum.
pub const MOMENTUM_MIN_DAYS_ACTIVE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionReason {
    Neglected,
    Momentum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub directive: Directive,
    pub epic: Epic,
    pub reason: SuggestionReason,
    pub stats: DirectiveStats,
}

struct Candidate<'a> {
    directive: &'a Directive,
    epic: &'a Epic,
    stats: DirectiveStats,
    /// Days since last check-in, `i64::MAX` if never checked in
    staleness: i64,
}

impl Candidate<'_> {
    fn is_neglected(&self) -> bool {
        if self.stats.last_checkin.is_none() {
            return true;
        }
        self.directive
            .interval
            .neglect_threshold_days()
            .is_some_and(|threshold| self.staleness > threshold)
    }

    fn to_action(&self, reason: SuggestionReason) -> SuggestedAction {
        SuggestedAction {
            directive: self.directive.clone(),
            epic: self.epic.clone(),
            reason,
            stats: self.stats.clone(),
        }
    }
}

/// Rank directives across all epics and return at most `max_actions`.
///
/// Up to two neglected directives (stalest first, never-checked-in before
/// anything else) are followed by momentum directives (most active days
/// first) filling the remaining budget. A directive already suggested as
/// neglected is not repeated as momentum. Ties keep epic and directive order.
pub fn get_suggested_actions(
    epics: &[Epic],
    logs: &[Log],
    max_actions: usize,
    as_of: DateTime<Utc>,
) -> Vec<SuggestedAction> {
    let candidates: Vec<Candidate<'_>> = epics
        .iter()
        .flat_map(|epic| epic.directives.iter().map(move |d| (epic, d)))
        .map(|(epic, directive)| {
            let stats = compute_directive_stats(directive, logs, as_of);
            let staleness = stats
                .last_checkin
                .map_or(i64::MAX, |last| days_since(last, as_of));
            Candidate {
                directive,
                epic,
                stats,
                staleness,
            }
        })
        .collect();

    let mut neglected: Vec<usize> = (0..candidates.len())
        .filter(|&i| candidates[i].is_neglected())
        .collect();
    neglected.sort_by(|&a, &b| candidates[b].staleness.cmp(&candidates[a].staleness));
    neglected.truncate(MAX_NEGLECTED.min(max_actions));

    let mut momentum: Vec<usize> = (0..candidates.len())
        .filter(|&i| candidates[i].stats.days_active > MOMENTUM_MIN_DAYS_ACTIVE)
        .filter(|i| !neglected.contains(i))
        .collect();
    momentum.sort_by(|&a, &b| {
        candidates[b]
            .stats
            .days_active
            .cmp(&candidates[a].stats.days_active)
    });
    momentum.truncate(max_actions - neglected.len());

    neglected
        .iter()
        .map(|&i| candidates[i].to_action(SuggestionReason::Neglected))
        .chain(
            momentum
                .iter()
                .map(|&i| candidates[i].to_action(SuggestionReason::Momentum)),
        )
        .collect()
}
