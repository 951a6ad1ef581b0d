//! Local-to-remote synchronization for calendar documents.
//!
//! One `(user, year)` pair is the unit of independent synchronization. Each
//! pass either pushes the local document (when change detection says local
//! data drifted since the last sync) or pulls the remote one -- whole
//! document replace in both directions, no field-level merge. The engine is
//! caller-driven: no internal threads, the shell pumps `tick()`.

pub mod detector;
pub mod engine;
pub mod remote;
pub mod session;
pub mod types;

#[cfg(test)]
mod session_tests;
#[cfg(test)]
pub(crate) mod testutil;

pub use engine::{Clock, SyncEngine, SyncInfo, SystemClock, DEFAULT_SYNC_INTERVAL_SECS};
pub use remote::{HttpRemoteStore, PushReceipt, RemoteStore};
pub use session::SyncSession;
pub use types::{RemoteError, StatusReport, SyncKey, SyncMetadata, SyncStatus};
