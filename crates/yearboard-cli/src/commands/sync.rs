//! Synchronization subcommands: manual sync, status indicator, watch loop.

use std::time::Duration as StdDuration;

use clap::Subcommand;
use yearboard_core::storage::FileStore;
use yearboard_core::sync::{detector, SystemClock};
use yearboard_core::{Config, HttpRemoteStore, SyncEngine, SyncKey, SyncSession, SyncStatus};

use crate::common::{check_year, current_year, load_config, open_local, CommandResult};

/// Sync actions.
#[derive(Subcommand)]
pub enum SyncAction {
    /// Run one sync pass now (push if local changed, pull otherwise)
    Now {
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
    /// Show sync state for a year without touching the network
    Status {
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
    /// Keep syncing in the foreground, printing status changes
    Watch {
        #[arg(long, default_value_t = current_year())]
        year: i32,
        /// Stop after this many seconds (0 = run until interrupted)
        #[arg(long, default_value_t = 0)]
        seconds: u64,
    },
}

type Session = SyncSession<HttpRemoteStore, FileStore, SystemClock>;

fn open_session(config: &Config) -> Result<Session, Box<dyn std::error::Error>> {
    let remote = HttpRemoteStore::new(config.server_url.clone(), config.auth_token.clone());
    let engine = SyncEngine::new(open_local()?, remote, SystemClock)
        .with_interval_secs(config.sync.interval_secs);
    Ok(SyncSession::new(engine))
}

fn indicator(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::Idle => "idle",
        SyncStatus::Syncing => "syncing...",
        SyncStatus::Success => "synced",
        SyncStatus::Error => "sync failed",
    }
}

fn print_report(session: &Session) {
    let report = session.status();
    match &report.error {
        Some(message) => println!("{}: {message}", indicator(report.status)),
        None => println!("{}", indicator(report.status)),
    }
    if let Some(info) = session.sync_info() {
        match info.last_sync {
            Some(at) => println!("last sync: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
            None => println!("last sync: never"),
        }
        if info.has_changes {
            println!("local changes pending");
        }
    }
}

pub fn run(action: SyncAction) -> CommandResult {
    match action {
        SyncAction::Now { year } => {
            check_year(year)?;
            let config = load_config()?;
            let mut session = open_session(&config)?;
            session.set_context(config.user_id.as_deref(), year);
            session.manual_sync();
            print_report(&session);
            if session.status().status == SyncStatus::Error {
                return Err("sync failed".into());
            }
            Ok(())
        }
        SyncAction::Status { year } => {
            check_year(year)?;
            let config = load_config()?;
            let local = open_local()?;
            let Some(user) = config.user_id.as_deref() else {
                println!("not signed in; data is local only");
                return Ok(());
            };
            let key = SyncKey::new(user, year);
            let meta = local.sync_metadata(&key);
            match chrono::DateTime::from_timestamp_millis(meta.last_sync).filter(|_| meta.last_sync > 0) {
                Some(at) => println!("last sync: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
                None => println!("last sync: never"),
            }
            if detector::has_local_changes(&local, &key) {
                println!("local changes pending");
            } else {
                println!("up to date with last sync");
            }
            Ok(())
        }
        SyncAction::Watch { year, seconds } => {
            check_year(year)?;
            let config = load_config()?;
            if config.user_id.is_none() {
                return Err("not signed in; run `yearboard account login` first".into());
            }
            let mut session = open_session(&config)?;
            session.set_context(config.user_id.as_deref(), year);

            let started = std::time::Instant::now();
            let mut last_shown = session.status().clone();
            print_report(&session);
            loop {
                session.tick();
                let report = session.status();
                if *report != last_shown {
                    last_shown = report.clone();
                    print_report(&session);
                }
                if seconds > 0 && started.elapsed().as_secs() >= seconds {
                    break;
                }
                std::thread::sleep(StdDuration::from_millis(250));
            }
            session.close();
            Ok(())
        }
    }
}
