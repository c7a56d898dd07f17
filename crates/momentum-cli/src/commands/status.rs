use chrono::{Datelike, Utc};
use serde::Serialize;

use momentum_core::display::{checkin_label, deadline_label};
use momentum_core::{
    compute_directive_stats, compute_epic_stats, Directive, DirectiveStats, Epic, EpicStats,
};

use super::open_snapshot;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DirectiveStatus<'a> {
    directive: &'a Directive,
    stats: DirectiveStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EpicStatus<'a> {
    epic: &'a Epic,
    stats: EpicStats,
    days_remaining: Option<i64>,
    directives: Vec<DirectiveStatus<'a>>,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_db, data) = open_snapshot()?;
    let now = Utc::now();

    let report: Vec<EpicStatus<'_>> = data
        .epics
        .iter()
        .map(|epic| EpicStatus {
            epic,
            stats: compute_epic_stats(epic, &data.logs, now),
            days_remaining: epic
                .deadline
                .map(|d| momentum_core::time::days_until(d, now)),
            directives: epic
                .directives
                .iter()
                .map(|directive| DirectiveStatus {
                    directive,
                    stats: compute_directive_stats(directive, &data.logs, now),
                })
                .collect(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} · day {} of {}", data.user.name, now.ordinal(), now.year());
    for entry in &report {
        let epic = entry.epic;
        let mut header = format!(
            "\n{} {} [{}] {:.0}h · {} days invested · {}% recent",
            epic.emoji,
            epic.name,
            epic.phase.label(),
            entry.stats.total_hours_logged,
            entry.stats.total_days_invested,
            entry.stats.recent_density
        );
        if let Some(target) = &epic.target {
            header.push_str(&format!(" · {}/{} {}", target.current, target.total, target.unit));
        }
        if let Some(label) = deadline_label(epic.deadline, now) {
            header.push_str(&format!(" · {label}"));
        }
        println!("{header}");

        let graph: String = entry
            .stats
            .commit_history
            .iter()
            .map(|&d| if d == 1 { '■' } else { '·' })
            .collect();
        println!("  {graph}");

        for d in &entry.directives {
            let flag = if d.stats.is_overdue { " (overdue)" } else { "" };
            println!(
                "  {} {:<32} {:>3}d active  {:>5.1}h  {}{}",
                d.directive.activity_type.emoji(),
                d.directive.name,
                d.stats.days_active,
                d.stats.hours_logged,
                checkin_label(d.stats.last_checkin, now),
                flag
            );
        }
    }
    Ok(())
}
