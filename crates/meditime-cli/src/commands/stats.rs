use chrono::Local;
use clap::Subcommand;
use meditime_core::storage::history;
use meditime_core::stats;

use super::common;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Totals and streaks
    Summary,
    /// Raw per-day records
    History,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let storage = common::open_storage();
    let full = history::load(&*storage)?;

    match action {
        StatsAction::Summary => {
            let today = Local::now().date_naive();
            let summary = stats::summary(&full, today);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::History => {
            println!("{}", serde_json::to_string_pretty(&full)?);
        }
    }
    Ok(())
}
