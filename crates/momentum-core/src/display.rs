//! Labels, icons and colours shown next to epics and directives.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{ActivityType, Phase};
use crate::time::{days_since, days_until};

/// Background and foreground colour of a phase badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseColors {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl ActivityType {
    pub fn emoji(&self) -> &'static str {
        match self {
            ActivityType::Build => "🛠",
            ActivityType::Learn => "📚",
            ActivityType::Train => "💪",
            ActivityType::Research => "🔍",
            ActivityType::Plan => "🎯",
            ActivityType::Arrange => "📋",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Build => "Build",
            ActivityType::Learn => "Learn",
            ActivityType::Train => "Train",
            ActivityType::Research => "Research",
            ActivityType::Plan => "Plan",
            ActivityType::Arrange => "Arrange",
        }
    }
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Exploring => "exploring",
            Phase::Building => "building",
            Phase::Active => "active",
            Phase::Refining => "refining",
            Phase::Paused => "paused",
        }
    }

    pub fn colors(&self) -> PhaseColors {
        let (background, foreground) = match self {
            Phase::Exploring => ("#f0ebe4", "#8a7f72"),
            Phase::Building => ("#e8efe8", "#5c6e5c"),
            Phase::Active => ("#e5f0f0", "#4a7171"),
            Phase::Refining => ("#f0e8f0", "#6e5c6e"),
            Phase::Paused => ("#f5f3f0", "#a09890"),
        };
        PhaseColors {
            background,
            foreground,
        }
    }
}

/// "not yet", "today" or "3d ago".
pub fn checkin_label(last_checkin: Option<DateTime<Utc>>, as_of: DateTime<Utc>) -> String {
    match last_checkin.map(|last| days_since(last, as_of)) {
        None => "not yet".to_string(),
        Some(days) if days <= 0 => "today".to_string(),
        Some(days) => format!("{days}d ago"),
    }
}

/// "12d left" for an epic with a deadline.
pub fn deadline_label(deadline: Option<NaiveDate>, as_of: DateTime<Utc>) -> Option<String> {
    deadline.map(|d| format!("{}d left", days_until(d, as_of)))
}
