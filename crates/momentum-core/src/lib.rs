//! # Momentum Core Library
//!
//! This library provides the core logic for Momentum, a personal tracker for
//! long-running goals ("epics") broken into recurring commitments
//! ("directives"). Work sessions are logged against directives and every
//! number shown to the user is derived from that log.
//!
//! ## Architecture
//!
//! - **Statistics**: pure functions from the log to per-directive and
//!   per-epic statistics, evaluated at an explicit `as_of` instant
//! - **Suggestions**: ranks neglected and high-momentum directives
//! - **Model**: immutable `MomentumData` snapshots; changes return a new
//!   snapshot
//! - **Storage**: SQLite persistence and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`compute_directive_stats`] / [`compute_epic_stats`]
//! - [`get_suggested_actions`]
//! - [`Database`]: Epic and log persistence
//! - [`Config`]: Application configuration management

pub mod display;
pub mod error;
pub mod model;
pub mod seed;
pub mod stats;
pub mod storage;
pub mod suggest;
pub mod time;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use model::{
    ActivityType, CheckinInterval, CheckinRequest, Directive, Epic, Log, LogSource,
    MomentumData, Phase, Target, User,
};
pub use seed::generate_seed_data;
pub use stats::{compute_directive_stats, compute_epic_stats, is_overdue, DirectiveStats, EpicStats};
pub use storage::{Config, Database};
pub use suggest::{get_suggested_actions, SuggestedAction, SuggestionReason};
