//! `dailist config`: read and edit `<data_dir>/config.toml`.
//!
//! Keys are dot paths into the file (`timer.focus_duration`,
//! `logging.level`). Every action prints JSON.

use clap::Subcommand;
use dailist_core::{Config, ConfigError};
use serde::Serialize;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// Dot-path key, e.g. "timer.short_break"
        key: String,
    },
    /// Change one setting and save the file
    Set {
        /// Dot-path key
        key: String,
        /// New value; numbers are whole minutes or seconds
        value: String,
    },
    /// Print the whole configuration
    List,
    /// Overwrite the file with defaults and print them
    Reset,
}

#[derive(Serialize)]
struct Setting<'a> {
    key: &'a str,
    value: String,
}

fn lookup<'a>(config: &Config, key: &'a str) -> Result<Setting<'a>, ConfigError> {
    config
        .get(key)
        .map(|value| Setting { key, value })
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let json = match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            serde_json::to_string_pretty(&lookup(&config, &key)?)?
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, "config updated");
            serde_json::to_string_pretty(&lookup(&config, &key)?)?
        }
        ConfigAction::List => serde_json::to_string_pretty(&Config::load()?)?,
        ConfigAction::Reset => {
            let defaults = Config::default();
            defaults.save()?;
            serde_json::to_string_pretty(&defaults)?
        }
    };
    println!("{json}");
    Ok(())
}
