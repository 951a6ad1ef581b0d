//! # Yearboard Core Library
//!
//! This library provides the core logic for the Yearboard yearly planner.
//! It implements a local-first philosophy: the local key-value store is the
//! source of truth for the UI, with an optional server-backed account that
//! calendar data syncs to in the background. The CLI binary and any GUI
//! shell are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Calendar model**: one `CalendarDocument` per year -- quarterly sticky
//!   notes plus twelve months of named topics and sticker events
//! - **Storage**: localStorage-shaped key-value substrate (`KvStore`) with a
//!   namespaced accessor (`LocalStore`) and TOML-based configuration
//! - **Sync**: a caller-driven engine that arbitrates push vs. pull per
//!   (user, year) key -- the caller pumps `tick()` periodically, the engine
//!   never spawns threads
//!
//! ## Key Components
//!
//! - [`CalendarDocument`]: the unit of persistence and synchronization
//! - [`LocalStore`]: reads/writes year documents to the local substrate
//! - [`SyncEngine`]: push/pull arbitration and auto-sync scheduling
//! - [`SyncSession`]: bridges the engine to a polling shell

pub mod calendar;
pub mod error;
pub mod storage;
pub mod sync;

pub use calendar::{CalendarDocument, MonthDocument, MonthlyTopic, QuarterlyNote, StickerEvent};
pub use error::{ConfigError, CoreError, StorageError};
pub use storage::{Config, FileStore, KvStore, LocalStore, MemoryStore};
pub use sync::{
    HttpRemoteStore, RemoteError, RemoteStore, SyncEngine, SyncKey, SyncSession, SyncStatus,
};
