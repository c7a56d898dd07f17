use chrono::Utc;
use clap::Args;

use momentum_core::{compute_directive_stats, CheckinRequest};

use super::open_snapshot;

#[derive(Args)]
pub struct CheckinArgs {
    /// Epic ID
    pub epic_id: String,
    /// Directive ID (must belong to the epic)
    pub directive_id: String,
    /// Duration in minutes
    #[arg(long)]
    pub minutes: Option<u32>,
    /// What you worked on
    #[arg(long, default_value = "")]
    pub note: String,
    /// Print the created log as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckinArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (db, data) = open_snapshot()?;
    let now = Utc::now();

    let request = CheckinRequest {
        epic_id: args.epic_id,
        directive_id: args.directive_id,
        note: args.note,
        duration_minutes: args.minutes,
    };
    let (next, log) = data.check_in(request, now)?;
    db.append_log(&log)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    if let Some(directive) = next.directive(&log.epic_id, &log.directive_id) {
        let stats = compute_directive_stats(directive, &next.logs, now);
        println!(
            "Logged {} ({} days active, {:.1}h total)",
            directive.name, stats.days_active, stats.hours_logged
        );
    }
    println!("Log ID: {}", log.id);
    Ok(())
}
