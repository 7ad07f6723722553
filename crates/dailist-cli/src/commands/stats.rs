use chrono::NaiveDate;
use clap::Subcommand;
use dailist_core::task::query::week_bounds;
use dailist_core::{Dashboard, Database, WeeklyStats};
use serde::Serialize;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Completion summary for tasks due this week (Monday to Sunday)
    Week,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekReport {
    week_start: NaiveDate,
    week_end: NaiveDate,
    #[serde(flatten)]
    stats: WeeklyStats,
    total: usize,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let dashboard = Dashboard::open(&db);

    match action {
        StatsAction::Week => {
            let (week_start, week_end) = week_bounds(dashboard.today());
            let stats = dashboard.weekly_stats();
            let report = WeekReport {
                week_start,
                week_end,
                stats,
                total: stats.total(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
