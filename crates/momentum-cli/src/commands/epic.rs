use chrono::Utc;
use clap::Subcommand;

use momentum_core::display::{checkin_label, deadline_label};
use momentum_core::{compute_directive_stats, compute_epic_stats, Phase, ValidationError};

use super::open_snapshot;

#[derive(Subcommand)]
pub enum EpicAction {
    /// List epics
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show one epic with its directives
    Show {
        /// Epic ID
        id: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Move an epic to another phase
    Phase {
        /// Epic ID
        id: String,
        /// exploring, building, active, refining or paused
        phase: String,
    },
    /// Set target progress
    Target {
        /// Epic ID
        id: String,
        /// New current value
        current: u32,
    },
}

pub fn run(action: EpicAction) -> Result<(), Box<dyn std::error::Error>> {
    let (db, data) = open_snapshot()?;
    let now = Utc::now();

    match action {
        EpicAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&data.epics)?);
            } else {
                for epic in &data.epics {
                    println!(
                        "{}  {} {}  [{}]  {} directives",
                        epic.id,
                        epic.emoji,
                        epic.name,
                        epic.phase.label(),
                        epic.directives.len()
                    );
                }
            }
        }
        EpicAction::Show { id, json } => {
            let epic = data
                .epic(&id)
                .ok_or_else(|| ValidationError::UnknownEpic(id.clone()))?;
            let stats = compute_epic_stats(epic, &data.logs, now);
            if json {
                let value = serde_json::json!({ "epic": epic, "stats": stats });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("{} {} [{}]", epic.emoji, epic.name, epic.phase.label());
            if !epic.description.is_empty() {
                println!("{}", epic.description);
            }
            if let Some(target) = &epic.target {
                println!("Target: {}/{} {}", target.current, target.total, target.unit);
            }
            if let Some(label) = deadline_label(epic.deadline, now) {
                println!("Deadline: {label}");
            }
            println!(
                "{} days invested · {:.1}h · {}% recent",
                stats.total_days_invested, stats.total_hours_logged, stats.recent_density
            );
            for directive in &epic.directives {
                let d = compute_directive_stats(directive, &data.logs, now);
                println!(
                    "  {}  {} {} ({}) · {}d · {}{}",
                    directive.id,
                    directive.activity_type.emoji(),
                    directive.name,
                    directive.interval,
                    d.days_active,
                    checkin_label(d.last_checkin, now),
                    if d.is_overdue { " · overdue" } else { "" }
                );
            }
        }
        EpicAction::Phase { id, phase } => {
            let phase: Phase = phase.parse()?;
            let next = data.with_epic_phase(&id, phase)?;
            if let Some(epic) = next.epic(&id) {
                db.save_epic(epic)?;
            }
            println!("{id} is now {}", phase.label());
        }
        EpicAction::Target { id, current } => {
            let next = data.with_epic_target_progress(&id, current)?;
            if let Some(epic) = next.epic(&id) {
                db.save_epic(epic)?;
                if let Some(target) = &epic.target {
                    println!("{id}: {}/{} {}", target.current, target.total, target.unit);
                }
            }
        }
    }
    Ok(())
}
