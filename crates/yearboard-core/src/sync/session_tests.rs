//! Tests for the session adapter lifecycle.

use super::session::SyncSession;
use super::testutil::{fitness_document, test_engine, FakeRemote, ManualClock};
use super::types::{SyncKey, SyncStatus};

fn session_with(
    remote: FakeRemote,
    clock: ManualClock,
) -> SyncSession<FakeRemote, crate::storage::MemoryStore, ManualClock> {
    SyncSession::new(test_engine(remote, clock))
}

#[test]
fn no_user_means_no_auto_sync_and_no_network() {
    let remote = FakeRemote::new();
    let clock = ManualClock::new();
    let mut session = session_with(remote.clone(), clock.clone());

    session.set_context(None, 2025);
    assert!(session.context().is_none());
    assert!(!session.can_sync());

    clock.advance_secs(60);
    session.tick();
    assert_eq!(remote.pulls() + remote.pushes(), 0);
}

#[test]
fn signing_in_pulls_once_then_starts_auto_sync() {
    let remote = FakeRemote::new();
    remote.insert_document(SyncKey::new("u1", 2025), fitness_document());
    let clock = ManualClock::new();
    let mut session = session_with(remote.clone(), clock.clone());

    session.set_context(Some("u1"), 2025);
    assert_eq!(remote.pulls(), 1); // page-load pull
    assert!(session.engine().is_auto_syncing(&SyncKey::new("u1", 2025)));
    assert_eq!(
        session.engine().local().read(Some("u1"), 2025),
        fitness_document()
    );

    clock.advance_secs(10);
    session.tick();
    assert_eq!(remote.pulls(), 2); // first auto-sync pass
}

#[test]
fn repeated_set_context_with_same_key_is_a_noop() {
    let remote = FakeRemote::new();
    let mut session = session_with(remote.clone(), ManualClock::new());

    session.set_context(Some("u1"), 2025);
    session.set_context(Some("u1"), 2025);
    assert_eq!(remote.pulls(), 1);
}

#[test]
fn changing_year_stops_the_old_timer_and_pulls_the_new_year() {
    let remote = FakeRemote::new();
    let mut session = session_with(remote.clone(), ManualClock::new());

    session.set_context(Some("u1"), 2025);
    session.set_context(Some("u1"), 2026);

    assert!(!session.engine().is_auto_syncing(&SyncKey::new("u1", 2025)));
    assert!(session.engine().is_auto_syncing(&SyncKey::new("u1", 2026)));
    assert_eq!(remote.pulls(), 2);
}

#[test]
fn signing_out_stops_auto_sync() {
    let remote = FakeRemote::new();
    let clock = ManualClock::new();
    let mut session = session_with(remote.clone(), clock.clone());

    session.set_context(Some("u1"), 2025);
    session.set_context(None, 2025);
    assert!(session.context().is_none());

    clock.advance_secs(60);
    session.tick();
    assert_eq!(remote.pulls(), 1); // only the original page-load pull
}

#[test]
fn failed_page_load_pull_still_starts_auto_sync() {
    let remote = FakeRemote::new();
    remote.set_fail(true);
    let clock = ManualClock::new();
    let mut session = session_with(remote.clone(), clock.clone());

    session.set_context(Some("u1"), 2025);
    assert!(session.engine().is_auto_syncing(&SyncKey::new("u1", 2025)));
    assert_eq!(session.status().status, SyncStatus::Error);

    remote.set_fail(false);
    clock.advance_secs(10);
    session.tick();
    assert_eq!(session.status().status, SyncStatus::Success);
}

#[test]
fn manual_sync_without_user_reports_sign_in_error() {
    let remote = FakeRemote::new();
    let mut session = session_with(remote.clone(), ManualClock::new());

    assert!(!session.manual_sync());
    let report = session.status();
    assert_eq!(report.status, SyncStatus::Error);
    assert_eq!(
        report.error.as_deref(),
        Some("Please sign in to sync your data")
    );
    assert_eq!(remote.pulls() + remote.pushes(), 0);
}

#[test]
fn manual_sync_with_user_runs_one_pass() {
    let remote = FakeRemote::new();
    let mut session = session_with(remote.clone(), ManualClock::new());

    session.set_context(Some("u1"), 2025);
    session
        .engine_mut()
        .local_mut()
        .write(Some("u1"), 2025, &fitness_document());

    assert!(session.manual_sync());
    assert_eq!(remote.pushes(), 1);
    assert_eq!(session.status().status, SyncStatus::Success);
    assert!(session.sync_info().unwrap().last_sync.is_some());
}

#[test]
fn status_snapshot_refreshes_on_the_poll_schedule() {
    let remote = FakeRemote::new();
    let clock = ManualClock::new();
    let mut session = session_with(remote.clone(), clock.clone());
    session.set_context(Some("u1"), 2025);

    // First tick always takes a snapshot.
    session.tick();
    assert_eq!(session.status().status, SyncStatus::Success);

    // Engine status changes out of band; the snapshot lags until the next
    // poll deadline.
    remote.set_fail(true);
    session.engine_mut().manual_sync(&SyncKey::new("u1", 2025));
    assert_eq!(session.status().status, SyncStatus::Success);

    clock.advance_secs(1);
    session.tick();
    assert_eq!(session.status().status, SyncStatus::Error);
}

#[test]
fn online_flag_gates_can_sync() {
    let remote = FakeRemote::new();
    let mut session = session_with(remote, ManualClock::new());

    session.set_context(Some("u1"), 2025);
    assert!(session.can_sync());
    session.set_online(false);
    assert!(!session.can_sync());
    assert!(!session.is_online());
}

#[test]
fn close_cancels_all_schedules() {
    let remote = FakeRemote::new();
    let clock = ManualClock::new();
    let mut session = session_with(remote.clone(), clock.clone());

    session.set_context(Some("u1"), 2025);
    session.close();
    assert!(session.context().is_none());

    clock.advance_secs(60);
    session.tick();
    assert_eq!(remote.pulls(), 1); // page-load pull only
}
