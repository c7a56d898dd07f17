pub mod checkin;
pub mod config;
pub mod data;
pub mod epic;
pub mod status;
pub mod suggest;

use momentum_core::{Config, Database, MomentumData};

/// Open the database and load the current snapshot, seeding on first use.
pub fn open_snapshot() -> Result<(Database, MomentumData), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let data = db.load_or_seed(chrono::Utc::now(), &config.user.name)?;
    Ok((db, data))
}
