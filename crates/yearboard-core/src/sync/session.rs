//! Session adapter bridging the engine to a reactive or polling shell.
//!
//! Plays the role the web client's sync hook plays: it owns the engine,
//! tracks the current `(user, year)` context, runs the page-load pull and
//! auto-sync lifecycle on context changes, and refreshes a cached status
//! snapshot on a short poll schedule so the shell can render an indicator
//! without talking to the engine directly.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::storage::KvStore;

use super::engine::{Clock, SyncEngine, SyncInfo};
use super::remote::RemoteStore;
use super::types::{StatusReport, SyncKey, SyncStatus};

/// Status poll period.
pub const STATUS_POLL_INTERVAL_SECS: u64 = 1;

/// Owns a [`SyncEngine`] and drives its lifecycle for one displayed year.
pub struct SyncSession<R, S, C> {
    engine: SyncEngine<R, S, C>,
    context: Option<SyncKey>,
    poll_interval: Duration,
    next_poll: Option<DateTime<Utc>>,
    snapshot: StatusReport,
    online: bool,
}

impl<R: RemoteStore, S: KvStore, C: Clock> SyncSession<R, S, C> {
    pub fn new(engine: SyncEngine<R, S, C>) -> Self {
        let snapshot = engine.status();
        Self {
            engine,
            context: None,
            poll_interval: Duration::seconds(STATUS_POLL_INTERVAL_SECS as i64),
            next_poll: None,
            snapshot,
            online: true,
        }
    }

    pub fn engine(&self) -> &SyncEngine<R, S, C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SyncEngine<R, S, C> {
        &mut self.engine
    }

    /// Switch to a new `(user, year)` context.
    ///
    /// Stops auto-sync for the previous key, and -- when a user is present
    /// -- clears page-load-pull tracking, issues the forced pull (failure is
    /// logged, never fatal: the shell continues on local data), and starts
    /// auto-sync. Without a user nothing is started: anonymous data stays
    /// local-only.
    pub fn set_context(&mut self, user: Option<&str>, year: i32) {
        let new_key = user.map(|u| SyncKey::new(u, year));
        if new_key == self.context {
            return;
        }

        if let Some(previous) = self.context.take() {
            self.engine.stop_auto_sync(&previous);
        }

        if let Some(key) = new_key {
            debug!(key = %key, "activating sync context");
            self.engine.clear_page_load_tracking();
            if let Err(e) = self.engine.force_pull(&key) {
                warn!(key = %key, error = %e, "page-load pull failed, continuing with local data");
            }
            self.engine.start_auto_sync(&key);
            self.context = Some(key);
        }

        self.snapshot = self.engine.status();
    }

    pub fn context(&self) -> Option<&SyncKey> {
        self.context.as_ref()
    }

    /// Pump the engine and refresh the status snapshot when the poll
    /// deadline elapsed. Call this from the shell's loop.
    pub fn tick(&mut self) {
        self.engine.tick();
        let now = self.engine.now();
        if self.next_poll.map_or(true, |due| due <= now) {
            self.snapshot = self.engine.status();
            self.next_poll = Some(now + self.poll_interval);
        }
    }

    /// Cached status snapshot, refreshed by [`SyncSession::tick`].
    pub fn status(&self) -> &StatusReport {
        &self.snapshot
    }

    /// One immediate arbitration pass. Returns whether it succeeded;
    /// without a signed-in user it fails with a sign-in message instead.
    pub fn manual_sync(&mut self) -> bool {
        let Some(key) = self.context.clone() else {
            self.snapshot = StatusReport {
                status: SyncStatus::Error,
                error: Some("Please sign in to sync your data".to_string()),
            };
            return false;
        };

        let ok = self.engine.manual_sync(&key);
        self.snapshot = self.engine.status();
        ok
    }

    /// Per-key display info for the current context.
    pub fn sync_info(&self) -> Option<SyncInfo> {
        self.context.as_ref().map(|key| self.engine.sync_info(key))
    }

    /// Network-online state, supplied by the shell (the engine never probes
    /// connectivity itself).
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn can_sync(&self) -> bool {
        self.context.is_some() && self.online
    }

    /// Deterministic teardown: cancel every auto-sync schedule.
    pub fn close(&mut self) {
        self.context = None;
        self.engine.stop_all_auto_sync();
    }
}
