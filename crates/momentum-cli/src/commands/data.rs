use chrono::Utc;
use clap::Subcommand;

use momentum_core::seed::generate_seed_data_for;
use momentum_core::{Config, Database};

use super::open_snapshot;

#[derive(Subcommand)]
pub enum DataAction {
    /// Print all data as JSON
    Export,
    /// Replace all data with the seed dataset
    Reset,
    /// Delete all data, then start again from the seed dataset
    Clear,
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DataAction::Export => {
            let (_db, data) = open_snapshot()?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        DataAction::Reset => {
            let config = Config::load()?;
            let db = Database::open()?;
            db.replace_all(&generate_seed_data_for(Utc::now(), &config.user.name))?;
            println!("data reset to seed");
        }
        DataAction::Clear => {
            let config = Config::load()?;
            let db = Database::open()?;
            let removed = db.log_count()?;
            db.clear()?;
            db.load_or_seed(Utc::now(), &config.user.name)?;
            println!("data cleared ({removed} logs removed)");
        }
    }
    Ok(())
}
