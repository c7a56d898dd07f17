//! Statistics module for Momentum
//!
//! Pure functions that turn the append-only log into per-directive and
//! per-epic statistics. Nothing here reads the clock; every entry point takes
//! the `as_of` instant the statistics should be computed for.

mod directive;
mod epic;
mod overdue;

pub use directive::{compute_directive_stats, DirectiveStats};
pub use epic::{
    commit_history, compute_epic_stats, recent_density, EpicStats, COMMIT_HISTORY_DAYS,
    RECENT_WINDOW_DAYS,
};
pub use overdue::is_overdue;
