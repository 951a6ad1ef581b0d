mod config;
pub mod kv;
pub mod local;

pub use config::{Config, SyncConfig};
pub use kv::{FileStore, KvStore, MemoryStore};
pub use local::LocalStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/yearboard[-dev]/` based on YEARBOARD_ENV.
///
/// Set YEARBOARD_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("YEARBOARD_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("yearboard-dev")
    } else {
        base_dir.join("yearboard")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
