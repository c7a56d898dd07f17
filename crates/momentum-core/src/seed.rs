//! Default dataset used for new databases, `data reset`, and as a test fixture.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::model::{
    ActivityType, CheckinInterval, Directive, Epic, Log, LogSource, MomentumData, Phase, Target,
    User,
};

/// Version written into freshly generated data.
pub const DATA_VERSION: u32 = 1;

/// Name given to the seeded user when none is configured.
pub const DEFAULT_USER_NAME: &str = "Collin";

fn start_of_year() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn directive(
    id: &str,
    name: &str,
    activity_type: ActivityType,
    interval: CheckinInterval,
) -> Directive {
    Directive {
        id: id.to_string(),
        name: name.to_string(),
        activity_type,
        interval,
        created_at: start_of_year(),
    }
}

fn target(current: u32, total: u32, unit: &str) -> Option<Target> {
    Some(Target {
        current,
        total,
        unit: unit.to_string(),
    })
}

struct EpicSeed<'a> {
    id: &'a str,
    name: &'a str,
    emoji: &'a str,
    description: &'a str,
    phase: Phase,
    deadline: Option<NaiveDate>,
    target: Option<Target>,
    directives: Vec<Directive>,
}

impl EpicSeed<'_> {
    fn build(self) -> Epic {
        Epic {
            id: self.id.to_string(),
            name: self.name.to_string(),
            emoji: self.emoji.to_string(),
            description: self.description.to_string(),
            phase: self.phase,
            created_at: start_of_year(),
            deadline: self.deadline,
            target: self.target,
            directives: self.directives,
        }
    }
}

fn log(
    id: &str,
    epic_id: &str,
    directive_id: &str,
    at: DateTime<Utc>,
    minutes: u32,
    note: &str,
) -> Log {
    Log {
        id: id.to_string(),
        epic_id: epic_id.to_string(),
        directive_id: directive_id.to_string(),
        timestamp: at,
        duration_minutes: Some(minutes),
        note: note.to_string(),
        source: LogSource::Manual,
    }
}

/// Build the seed dataset with sample logs placed relative to `now`.
pub fn generate_seed_data(now: DateTime<Utc>) -> MomentumData {
    generate_seed_data_for(now, DEFAULT_USER_NAME)
}

/// Same as [`generate_seed_data`] with a custom user name.
pub fn generate_seed_data_for(now: DateTime<Utc>, user_name: &str) -> MomentumData {
    use ActivityType::*;
    use CheckinInterval::*;

    let epics = vec![
        EpicSeed {
            id: "epic_001",
            name: "Lighting Business",
            emoji: "💡",
            description: "Computational paper lamps → market",
            phase: Phase::Building,
            deadline: None,
            target: None,
            directives: vec![
                directive("dir_001", "Assembly mechanism R&D", Build, Weekly),
                directive("dir_002", "Unfolding algorithm", Build, Weekly),
                directive("dir_003", "Market & pricing research", Research, Biweekly),
                directive("dir_004", "Store setup & fulfillment", Arrange, Monthly),
            ],
        },
        EpicSeed {
            id: "epic_002",
            name: "Race Season 2025",
            emoji: "🏃",
            description: "Half marathon + triathlon",
            phase: Phase::Active,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 15),
            target: target(0, 2, "races"),
            directives: vec![
                directive("dir_005", "Structured training", Train, Weekly),
                directive("dir_006", "FTP & performance tracking", Research, Biweekly),
                directive("dir_007", "Race registration & logistics", Arrange, Monthly),
            ],
        },
        EpicSeed {
            id: "epic_003",
            name: "Deep Reading",
            emoji: "📖",
            description: "Books + academic papers",
            phase: Phase::Active,
            deadline: None,
            target: target(1, 5, "books"),
            directives: vec![
                directive("dir_008", "Book reading", Learn, Daily),
                directive("dir_009", "Paper reading (3-4/month)", Learn, Weekly),
            ],
        },
        EpicSeed {
            id: "epic_004",
            name: "Side Projects",
            emoji: "⚡",
            description: "4 meaningful builds this year",
            phase: Phase::Exploring,
            deadline: None,
            target: target(0, 4, "projects"),
            directives: vec![
                directive("dir_010", "This app (Momentum)", Build, Weekly),
                directive("dir_011", "Project ideation", Plan, Biweekly),
            ],
        },
        EpicSeed {
            id: "epic_005",
            name: "Academic Course",
            emoji: "🎓",
            description: "Complete one structured course",
            phase: Phase::Paused,
            deadline: None,
            target: target(0, 1, "course"),
            directives: vec![
                directive("dir_012", "Course selection", Research, Monthly),
                directive("dir_013", "Weekly lessons", Learn, Weekly),
            ],
        },
        EpicSeed {
            id: "epic_006",
            name: "Daily Practice",
            emoji: "🌱",
            description: "Chinese, cooking, screen discipline",
            phase: Phase::Active,
            deadline: None,
            target: None,
            directives: vec![
                directive("dir_014", "Chinese practice", Learn, Daily),
                directive("dir_015", "Cooking (3x/week)", Build, Weekly),
                directive("dir_016", "Screen time review", Plan, Daily),
            ],
        },
    ]
    .into_iter()
    .map(EpicSeed::build)
    .collect();

    let logs = vec![
        log(
            "log_001",
            "epic_001",
            "dir_001",
            now - Duration::days(1),
            60,
            "Worked on hinge mechanism, tried 3 different approaches",
        ),
        log("log_002", "epic_002", "dir_005", now, 90, "10K run + strength training"),
        log("log_003", "epic_003", "dir_008", now, 45, "Read chapters 4-5 of Atomic Habits"),
        log("log_004", "epic_004", "dir_010", now, 120, "Built UI components for Momentum app"),
    ];

    MomentumData {
        version: DATA_VERSION,
        user: User {
            name: user_name.to_string(),
            created_at: start_of_year(),
        },
        epics,
        logs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_seed_shape() {
        let data = generate_seed_data(now());
        assert_eq!(data.version, DATA_VERSION);
        assert_eq!(data.epics.len(), 6);
        assert_eq!(data.epics.iter().map(|e| e.directives.len()).sum::<usize>(), 16);
        assert_eq!(data.logs.len(), 4);
    }

    #[test]
    fn test_seed_logs_reference_owned_directives() {
        let data = generate_seed_data(now());
        for log in &data.logs {
            assert!(
                data.directive(&log.epic_id, &log.directive_id).is_some(),
                "{} points at a foreign directive",
                log.id
            );
        }
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let data = generate_seed_data(now());
        let ids: HashSet<&str> = data
            .epics
            .iter()
            .flat_map(|e| e.directives.iter().map(|d| d.id.as_str()))
            .collect();
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn test_seed_is_deterministic_for_same_instant() {
        assert_eq!(generate_seed_data(now()), generate_seed_data(now()));
    }

    #[test]
    fn test_custom_user_name() {
        let data = generate_seed_data_for(now(), "Sam");
        assert_eq!(data.user.name, "Sam");
    }
}
