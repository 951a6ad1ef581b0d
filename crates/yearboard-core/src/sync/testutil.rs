//! Shared fakes for sync tests: an in-memory remote and a manual clock.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::calendar::{CalendarDocument, MonthlyTopic, StickerEvent};
use crate::storage::{LocalStore, MemoryStore};

use super::engine::{Clock, SyncEngine};
use super::remote::{PushReceipt, RemoteStore};
use super::types::{RemoteError, SyncKey};

/// Clock driven by the test. Clones share the same instant.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now.set(self.now.get() + Duration::seconds(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[derive(Default)]
struct RemoteState {
    docs: RefCell<HashMap<SyncKey, CalendarDocument>>,
    pulls: Cell<usize>,
    pushes: Cell<usize>,
    fail: Cell<bool>,
    unauthorized: Cell<bool>,
}

/// In-memory remote store. Clones share state, so a test can keep a handle
/// for assertions after handing one to the engine.
#[derive(Clone, Default)]
pub struct FakeRemote {
    state: Rc<RemoteState>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_document(&self, key: SyncKey, doc: CalendarDocument) {
        self.state.docs.borrow_mut().insert(key, doc);
    }

    pub fn document(&self, key: &SyncKey) -> Option<CalendarDocument> {
        self.state.docs.borrow().get(key).cloned()
    }

    pub fn pulls(&self) -> usize {
        self.state.pulls.get()
    }

    pub fn pushes(&self) -> usize {
        self.state.pushes.get()
    }

    /// Make every call fail with a transport error.
    pub fn set_fail(&self, fail: bool) {
        self.state.fail.set(fail);
    }

    /// Make every call fail with an authentication error.
    pub fn set_unauthorized(&self, unauthorized: bool) {
        self.state.unauthorized.set(unauthorized);
    }

    fn check_reachable(&self) -> Result<(), RemoteError> {
        if self.state.fail.get() {
            return Err(RemoteError::Transport("connection refused".into()));
        }
        if self.state.unauthorized.get() {
            return Err(RemoteError::AuthenticationRequired);
        }
        Ok(())
    }
}

impl RemoteStore for FakeRemote {
    fn pull(&self, key: &SyncKey) -> Result<CalendarDocument, RemoteError> {
        self.state.pulls.set(self.state.pulls.get() + 1);
        self.check_reachable()?;
        self.state
            .docs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(RemoteError::NotFound)
    }

    fn push(&self, key: &SyncKey, doc: &CalendarDocument) -> Result<PushReceipt, RemoteError> {
        self.state.pushes.set(self.state.pushes.get() + 1);
        self.check_reachable()?;
        self.state.docs.borrow_mut().insert(key.clone(), doc.clone());
        Ok(PushReceipt {
            version: self.state.pushes.get() as i64,
            last_modified: Utc::now(),
        })
    }
}

/// Fresh engine over an empty in-memory store.
pub fn test_engine(
    remote: FakeRemote,
    clock: ManualClock,
) -> SyncEngine<FakeRemote, MemoryStore, ManualClock> {
    SyncEngine::new(LocalStore::new(MemoryStore::new()), remote, clock)
}

/// A document with one named topic and one event: month 1, topic 0 is
/// "Fitness" with Gym on days 5-7.
pub fn fitness_document() -> CalendarDocument {
    let mut doc = CalendarDocument::default();
    doc.month_mut(1).unwrap().topics[0] = MonthlyTopic {
        name: "Fitness".into(),
        events: vec![StickerEvent::new(5, 7, "Gym")],
    };
    doc
}
