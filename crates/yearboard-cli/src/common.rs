//! Shared helpers for CLI commands.

use chrono::Datelike;
use yearboard_core::calendar::SUPPORTED_YEARS;
use yearboard_core::storage::data_dir;
use yearboard_core::{Config, FileStore, LocalStore};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Open the on-disk local store the same way the app shell does.
pub fn open_local() -> Result<LocalStore<FileStore>, Box<dyn std::error::Error>> {
    let path = data_dir()?.join("local-data.json");
    Ok(LocalStore::new(FileStore::open(path)?))
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    Ok(Config::load()?)
}

/// Reject years the planner does not offer.
pub fn check_year(year: i32) -> CommandResult {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(format!(
            "year {year} is out of range ({}-{})",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )
        .into())
    }
}
