//! Core types for calendar synchronization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The `(user, year)` pair identifying one independently synchronized
/// calendar document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncKey {
    pub user_id: String,
    pub year: i32,
}

impl SyncKey {
    pub fn new(user_id: impl Into<String>, year: i32) -> Self {
        Self {
            user_id: user_id.into(),
            year,
        }
    }
}

impl fmt::Display for SyncKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.user_id, self.year)
    }
}

/// Last-observed sync outcome, shared across all sync keys.
///
/// A single scalar by design: the UI shows one year at a time, so a per-key
/// status map would be over-engineering for the intended usage. Concurrent
/// multi-year sync would make this misleading; revisit if that ever becomes
/// a requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
    Success,
    Error,
}

/// Status plus the human-readable message for the error case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub status: SyncStatus,
    pub error: Option<String>,
}

/// Per-key sync bookkeeping, persisted alongside user data.
///
/// Created on first sync attempt for a key, updated after every successful
/// push or pull, never deleted except by an explicit data erase. Timestamps
/// are epoch milliseconds; zero means "never".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetadata {
    pub last_sync: i64,
    pub last_local_change: i64,
    pub user_id: String,
    pub year: i32,
}

impl SyncMetadata {
    pub fn new(key: &SyncKey) -> Self {
        Self {
            last_sync: 0,
            last_local_change: 0,
            user_id: key.user_id.clone(),
            year: key.year,
        }
    }
}

/// Remote store failure modes.
///
/// `NotFound` is benign from the engine's point of view: it means "no
/// document exists yet for that year", not a failure.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Authentication required - please sign in")]
    AuthenticationRequired,

    #[error("No remote data for this year")]
    NotFound,

    #[error("{0}")]
    Transport(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_key_display_matches_storage_convention() {
        assert_eq!(SyncKey::new("u1", 2025).to_string(), "u1-2025");
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let meta = SyncMetadata::new(&SyncKey::new("u1", 2025));
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"lastSync\":0"));
        assert!(json.contains("\"lastLocalChange\":0"));
        assert!(json.contains("\"userId\":\"u1\""));
    }

    #[test]
    fn status_defaults_to_idle() {
        assert_eq!(StatusReport::default().status, SyncStatus::Idle);
    }
}
