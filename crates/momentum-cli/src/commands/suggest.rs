use chrono::Utc;

use momentum_core::display::checkin_label;
use momentum_core::{get_suggested_actions, Config, SuggestionReason};

use super::open_snapshot;

pub fn run(max: Option<usize>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let max_actions = match max {
        Some(n) => n,
        None => Config::load()?.suggestions.max_actions,
    };
    let (_db, data) = open_snapshot()?;
    let now = Utc::now();

    let actions = get_suggested_actions(&data.epics, &data.logs, max_actions, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&actions)?);
        return Ok(());
    }

    if actions.is_empty() {
        println!("Nothing to suggest right now.");
        return Ok(());
    }
    for action in &actions {
        let why = match action.reason {
            SuggestionReason::Neglected => format!(
                "neglected, last check-in {}",
                checkin_label(action.stats.last_checkin, now)
            ),
            SuggestionReason::Momentum => {
                format!("momentum, {} active days", action.stats.days_active)
            }
        };
        println!(
            "{} {} / {} ({})  [{} {}]",
            action.directive.activity_type.emoji(),
            action.epic.name,
            action.directive.name,
            why,
            action.epic.id,
            action.directive.id
        );
    }
    Ok(())
}
