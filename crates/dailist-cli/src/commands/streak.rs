use dailist_core::{Dashboard, Database};

/// Print the streak record after today's open has been counted.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let dashboard = Dashboard::open(&db);
    println!("{}", serde_json::to_string_pretty(&dashboard.streak_state())?);
    Ok(())
}
