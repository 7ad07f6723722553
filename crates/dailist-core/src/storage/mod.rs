mod config;
pub mod database;

pub use config::{Config, LoggingConfig, TimerConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// Resolution order:
/// - `DAILIST_DATA_DIR` if set,
/// - `~/.config/dailist-dev/` when `DAILIST_ENV=dev`,
/// - `~/.config/dailist/` otherwise.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("DAILIST_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAILIST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dailist-dev")
            } else {
                base_dir.join("dailist")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Key/value persistence used by the task store and the streak tracker.
///
/// Each `set` replaces the whole record for `key` in one step: readers see
/// either the previous value or the new one, never a partial write.
pub trait KvStore {
    /// Read the record stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the record stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
