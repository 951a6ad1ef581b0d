//! Sync engine: push/pull arbitration and auto-sync scheduling.
//!
//! The engine is a caller-driven state machine in the same mold as a
//! wall-clock timer: it never spawns threads and holds per-key deadlines
//! instead of OS timers. The shell pumps [`SyncEngine::tick`] periodically;
//! each tick runs one arbitration pass for every key whose auto-sync
//! deadline elapsed.
//!
//! ## Arbitration
//!
//! ```text
//! syncing -> has_local_changes? -- yes --> push (replace remote)
//!                               \- no ---> pull (replace local)
//! ```
//!
//! Whole-document replace in both directions, last-writer-wins. A `NotFound`
//! on pull is a successful no-op. Any other failure sets the shared status
//! to `Error` and leaves local data untouched.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error};

use crate::storage::{KvStore, LocalStore};

use super::detector;
use super::remote::RemoteStore;
use super::types::{RemoteError, StatusReport, SyncKey, SyncStatus};

/// Auto-sync period when none is configured.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 10;

/// Time source, injected so tests can drive deadlines manually.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Read-only projection of per-key sync state for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncInfo {
    pub last_sync: Option<DateTime<Utc>>,
    pub has_changes: bool,
    pub is_auto_syncing: bool,
}

#[derive(Debug)]
struct AutoSync {
    interval: Duration,
    next_due: DateTime<Utc>,
}

/// The sync state machine for all `(user, year)` keys.
///
/// One instance per running app, constructed at the application root with
/// its dependencies injected; tests build as many as they like.
///
/// Shared state is deliberately coarse: a single status scalar covers all
/// keys (the UI shows one year at a time), and a transient set tracks which
/// keys already ran their page-load pull this process.
pub struct SyncEngine<R, S, C> {
    local: LocalStore<S>,
    remote: R,
    clock: C,
    interval: Duration,
    status: StatusReport,
    timers: HashMap<SyncKey, AutoSync>,
    page_load_pulls: HashSet<SyncKey>,
    /// Guards against overlapping passes for the same key.
    in_flight: HashSet<SyncKey>,
}

impl<R: RemoteStore, S: KvStore, C: Clock> SyncEngine<R, S, C> {
    pub fn new(local: LocalStore<S>, remote: R, clock: C) -> Self {
        Self {
            local,
            remote,
            clock,
            interval: Duration::seconds(DEFAULT_SYNC_INTERVAL_SECS as i64),
            status: StatusReport::default(),
            timers: HashMap::new(),
            page_load_pulls: HashSet::new(),
            in_flight: HashSet::new(),
        }
    }

    /// Override the auto-sync period.
    pub fn with_interval_secs(mut self, secs: u64) -> Self {
        self.interval = Duration::seconds(secs.max(1) as i64);
        self
    }

    pub fn local(&self) -> &LocalStore<S> {
        &self.local
    }

    pub fn local_mut(&mut self) -> &mut LocalStore<S> {
        &mut self.local
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Last-observed outcome across all keys.
    pub fn status(&self) -> StatusReport {
        self.status.clone()
    }

    fn set_status(&mut self, status: SyncStatus, error: Option<String>) {
        self.status = StatusReport { status, error };
    }

    // ── Auto-sync lifecycle ──────────────────────────────────────────

    /// Schedule recurring sync for a key. Idempotent: an existing schedule
    /// for the same key is replaced, never duplicated.
    pub fn start_auto_sync(&mut self, key: &SyncKey) {
        self.stop_auto_sync(key);
        let next_due = self.clock.now() + self.interval;
        self.timers.insert(
            key.clone(),
            AutoSync {
                interval: self.interval,
                next_due,
            },
        );
        debug!(key = %key, "started auto-sync");
    }

    /// Cancel the schedule for a key. Safe no-op when none exists.
    pub fn stop_auto_sync(&mut self, key: &SyncKey) {
        if self.timers.remove(key).is_some() {
            debug!(key = %key, "stopped auto-sync");
        }
    }

    /// Cancel every schedule.
    pub fn stop_all_auto_sync(&mut self) {
        if !self.timers.is_empty() {
            debug!(count = self.timers.len(), "stopped all auto-sync");
        }
        self.timers.clear();
    }

    pub fn is_auto_syncing(&self, key: &SyncKey) -> bool {
        self.timers.contains_key(key)
    }

    /// Run one arbitration pass for every due key and reschedule them.
    /// Returns the number of passes run.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let due: Vec<SyncKey> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.next_due <= now)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &due {
            self.perform_sync(key);
            if let Some(timer) = self.timers.get_mut(key) {
                timer.next_due = now + timer.interval;
            }
        }
        due.len()
    }

    // ── Page-load pull ───────────────────────────────────────────────

    /// Pull server state over local state, at most once per process per
    /// key. A repeat call is a silent no-op so reactive shells can
    /// re-invoke it on re-render without duplicating network I/O.
    ///
    /// # Errors
    /// Returns the underlying remote failure; the key stays unrecorded so a
    /// later call may retry.
    pub fn force_pull(&mut self, key: &SyncKey) -> Result<(), RemoteError> {
        if self.page_load_pulls.contains(key) {
            debug!(key = %key, "already pulled on this page load");
            return Ok(());
        }

        debug!(key = %key, "force pulling on page load");
        self.set_status(SyncStatus::Syncing, None);
        match self.pull(key) {
            Ok(()) => {
                self.page_load_pulls.insert(key.clone());
                self.set_status(SyncStatus::Success, None);
                Ok(())
            }
            Err(e) => {
                error!(key = %key, error = %e, "force pull failed");
                self.set_status(SyncStatus::Error, Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Forget which keys already ran their page-load pull (fresh session
    /// context, or tests).
    pub fn clear_page_load_tracking(&mut self) {
        self.page_load_pulls.clear();
    }

    // ── Sync passes ──────────────────────────────────────────────────

    /// One arbitration pass, reporting success. Never panics.
    pub fn manual_sync(&mut self, key: &SyncKey) -> bool {
        self.perform_sync(key)
    }

    fn perform_sync(&mut self, key: &SyncKey) -> bool {
        if !self.in_flight.insert(key.clone()) {
            debug!(key = %key, "sync already in flight, skipping");
            return false;
        }

        self.set_status(SyncStatus::Syncing, None);
        let has_changes = detector::has_local_changes(&self.local, key);
        debug!(key = %key, has_changes, "sync pass");

        let result = if has_changes {
            self.push(key)
        } else {
            self.pull(key)
        };
        self.in_flight.remove(key);

        match result {
            Ok(()) => {
                self.set_status(SyncStatus::Success, None);
                true
            }
            Err(e) => {
                error!(key = %key, error = %e, "sync failed");
                self.set_status(SyncStatus::Error, Some(e.to_string()));
                false
            }
        }
    }

    fn push(&mut self, key: &SyncKey) -> Result<(), RemoteError> {
        debug!(key = %key, "pushing to server");
        let doc = self.local.read(Some(&key.user_id), key.year);
        self.remote.push(key, &doc)?;

        let now_ms = self.clock.now().timestamp_millis();
        let mut meta = self.local.sync_metadata(key);
        meta.last_sync = now_ms;
        meta.last_local_change = now_ms;
        self.local.set_sync_metadata(&meta);
        self.refresh_stored_hash(key);
        Ok(())
    }

    fn pull(&mut self, key: &SyncKey) -> Result<(), RemoteError> {
        debug!(key = %key, "pulling from server");
        let doc = match self.remote.pull(key) {
            Ok(doc) => doc,
            // No data on server, nothing to pull.
            Err(RemoteError::NotFound) => {
                debug!(key = %key, "no data on server");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        self.local.write(Some(&key.user_id), key.year, &doc);
        let mut meta = self.local.sync_metadata(key);
        meta.last_sync = self.clock.now().timestamp_millis();
        self.local.set_sync_metadata(&meta);
        self.refresh_stored_hash(key);
        Ok(())
    }

    fn refresh_stored_hash(&mut self, key: &SyncKey) {
        let hash = detector::document_hash(&self.local, Some(&key.user_id), key.year);
        self.local.set_stored_hash(key, &hash);
    }

    // ── Display projection ───────────────────────────────────────────

    /// Per-key state for display. Read-only: no mutation, no network I/O.
    pub fn sync_info(&self, key: &SyncKey) -> SyncInfo {
        let meta = self.local.sync_metadata(key);
        SyncInfo {
            last_sync: (meta.last_sync > 0)
                .then(|| DateTime::from_timestamp_millis(meta.last_sync))
                .flatten(),
            has_changes: detector::has_local_changes(&self.local, key),
            is_auto_syncing: self.timers.contains_key(key),
        }
    }
}
