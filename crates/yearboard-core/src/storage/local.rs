//! Local store accessor for calendar documents.
//!
//! Keys are namespaced by the presence of a user id so anonymous and
//! authenticated data never collide:
//!
//! ```text
//! user-{id}/year-{y}/quarter-{q}/notes        year-{y}/quarter-{q}/notes
//! user-{id}/year-{y}/month-{m}/topic-order    year-{y}/month-{m}/topic-order
//! user-{id}/year-{y}/month-{m}/topic-{t}/name
//! user-{id}/year-{y}/month-{m}/topic-{t}/events
//! ```
//!
//! Topic names are stored raw; everything else is JSON. Reads always return
//! a structurally complete document: missing or malformed fragments fall
//! back to their defaults instead of erroring.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::calendar::{
    CalendarDocument, MonthDocument, MonthlyTopic, QuarterlyNote, StickerEvent, DEFAULT_TOPIC_IDS,
    MONTHS_PER_YEAR, QUARTERS,
};
use crate::sync::{SyncKey, SyncMetadata};

use super::KvStore;

/// Reads and writes one year's calendar document against a [`KvStore`].
#[derive(Debug)]
pub struct LocalStore<S> {
    kv: S,
}

fn year_prefix(user: Option<&str>, year: i32) -> String {
    match user {
        Some(id) => format!("user-{id}/year-{year}"),
        None => format!("year-{year}"),
    }
}

fn parse_or_default<T: Default + DeserializeOwned>(raw: Option<String>, key: &str) -> T {
    match raw {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(key, error = %e, "malformed stored value, using default");
            T::default()
        }),
        None => T::default(),
    }
}

impl<S: KvStore> LocalStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    fn notes_key(user: Option<&str>, year: i32, quarter: u8) -> String {
        format!("{}/quarter-{quarter}/notes", year_prefix(user, year))
    }

    fn topic_order_key(user: Option<&str>, year: i32, month: usize) -> String {
        format!("{}/month-{month}/topic-order", year_prefix(user, year))
    }

    fn topic_name_key(user: Option<&str>, year: i32, month: usize, topic: u32) -> String {
        format!("{}/month-{month}/topic-{topic}/name", year_prefix(user, year))
    }

    fn topic_events_key(user: Option<&str>, year: i32, month: usize, topic: u32) -> String {
        format!(
            "{}/month-{month}/topic-{topic}/events",
            year_prefix(user, year)
        )
    }

    /// Assemble the full document for `(user, year)`.
    ///
    /// Never fails: missing keys and malformed JSON both yield the
    /// structural default for that fragment.
    pub fn read(&self, user: Option<&str>, year: i32) -> CalendarDocument {
        let notes = (1..=QUARTERS)
            .map(|q| {
                let key = Self::notes_key(user, year, q);
                let notes: Vec<QuarterlyNote> = parse_or_default(self.kv.get(&key), &key);
                (q, notes)
            })
            .collect();

        let months = (1..=MONTHS_PER_YEAR)
            .map(|m| {
                let order_key = Self::topic_order_key(user, year, m);
                let topic_order = match self.kv.get(&order_key) {
                    Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                        warn!(key = %order_key, error = %e, "malformed topic order, using default");
                        DEFAULT_TOPIC_IDS.to_vec()
                    }),
                    None => DEFAULT_TOPIC_IDS.to_vec(),
                };
                let topics = DEFAULT_TOPIC_IDS
                    .iter()
                    .map(|&t| {
                        let name = self
                            .kv
                            .get(&Self::topic_name_key(user, year, m, t))
                            .unwrap_or_default();
                        let events_key = Self::topic_events_key(user, year, m, t);
                        let events: Vec<StickerEvent> =
                            parse_or_default(self.kv.get(&events_key), &events_key);
                        MonthlyTopic { name, events }
                    })
                    .collect();
                MonthDocument {
                    topic_order,
                    topics,
                }
            })
            .collect();

        CalendarDocument { notes, months }
    }

    /// Write every fragment of `doc` for `(user, year)`.
    pub fn write(&mut self, user: Option<&str>, year: i32, doc: &CalendarDocument) {
        for q in 1..=QUARTERS {
            let notes = doc.quarter_notes(q);
            if let Ok(json) = serde_json::to_string(notes) {
                self.kv.set(&Self::notes_key(user, year, q), &json);
            }
        }
        for (idx, month) in doc.months.iter().take(MONTHS_PER_YEAR).enumerate() {
            let m = idx + 1;
            if let Ok(json) = serde_json::to_string(&month.topic_order) {
                self.kv.set(&Self::topic_order_key(user, year, m), &json);
            }
            for (&t, topic) in DEFAULT_TOPIC_IDS.iter().zip(&month.topics) {
                self.kv
                    .set(&Self::topic_name_key(user, year, m, t), &topic.name);
                if let Ok(json) = serde_json::to_string(&topic.events) {
                    self.kv.set(&Self::topic_events_key(user, year, m, t), &json);
                }
            }
        }
    }

    /// Remove every fragment for `(user, year)`.
    pub fn clear(&mut self, user: Option<&str>, year: i32) {
        for q in 1..=QUARTERS {
            self.kv.remove(&Self::notes_key(user, year, q));
        }
        for m in 1..=MONTHS_PER_YEAR {
            self.kv.remove(&Self::topic_order_key(user, year, m));
            for &t in &DEFAULT_TOPIC_IDS {
                self.kv.remove(&Self::topic_name_key(user, year, m, t));
                self.kv.remove(&Self::topic_events_key(user, year, m, t));
            }
        }
    }

    // ── Sync engine bookkeeping ──────────────────────────────────────
    //
    // Not user data: metadata and the last-synced content hash live under
    // dedicated keys and are only touched by the sync layer.

    fn metadata_key(key: &SyncKey) -> String {
        format!("sync-metadata-{}-{}", key.user_id, key.year)
    }

    fn hash_key(key: &SyncKey) -> String {
        format!("data-hash-{}-{}", key.user_id, key.year)
    }

    pub fn sync_metadata(&self, key: &SyncKey) -> SyncMetadata {
        let storage_key = Self::metadata_key(key);
        match self.kv.get(&storage_key) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(key = %storage_key, error = %e, "malformed sync metadata, resetting");
                SyncMetadata::new(key)
            }),
            None => SyncMetadata::new(key),
        }
    }

    pub fn set_sync_metadata(&mut self, meta: &SyncMetadata) {
        let key = SyncKey::new(&meta.user_id, meta.year);
        if let Ok(json) = serde_json::to_string(meta) {
            self.kv.set(&Self::metadata_key(&key), &json);
        }
    }

    pub fn stored_hash(&self, key: &SyncKey) -> Option<String> {
        self.kv.get(&Self::hash_key(key))
    }

    pub fn set_stored_hash(&mut self, key: &SyncKey, hash: &str) {
        self.kv.set(&Self::hash_key(key), hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn sample_document() -> CalendarDocument {
        let mut doc = CalendarDocument::default();
        doc.month_mut(1).unwrap().topics[0] = MonthlyTopic {
            name: "Fitness".into(),
            events: vec![StickerEvent::new(5, 7, "Gym")],
        };
        doc.notes
            .entry(3)
            .or_default()
            .push(QuarterlyNote::new(1, 2, "book flights").with_span(2, 1));
        doc
    }

    #[test]
    fn read_returns_complete_default_when_empty() {
        let store = LocalStore::new(MemoryStore::new());
        let doc = store.read(Some("u1"), 2025);
        assert_eq!(doc, CalendarDocument::default());
    }

    #[test]
    fn write_read_round_trips() {
        let mut store = LocalStore::new(MemoryStore::new());
        let doc = sample_document();
        store.write(Some("u1"), 2025, &doc);
        assert_eq!(store.read(Some("u1"), 2025), doc);
    }

    #[test]
    fn anonymous_and_user_data_never_collide() {
        let mut store = LocalStore::new(MemoryStore::new());
        store.write(Some("u1"), 2025, &sample_document());

        assert_eq!(store.read(None, 2025), CalendarDocument::default());

        store.write(None, 2025, &CalendarDocument::default());
        assert_eq!(store.read(Some("u1"), 2025), sample_document());
    }

    #[test]
    fn years_are_independent() {
        let mut store = LocalStore::new(MemoryStore::new());
        store.write(Some("u1"), 2025, &sample_document());
        assert_eq!(store.read(Some("u1"), 2026), CalendarDocument::default());
    }

    #[test]
    fn malformed_fragment_falls_back_to_default() {
        let mut kv = MemoryStore::new();
        kv.set("user-u1/year-2025/month-1/topic-0/events", "not json {");
        kv.set("user-u1/year-2025/month-1/topic-order", "also bad");
        let store = LocalStore::new(kv);

        let doc = store.read(Some("u1"), 2025);
        assert!(doc.month(1).unwrap().topics[0].events.is_empty());
        assert_eq!(doc.month(1).unwrap().topic_order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn clear_removes_all_fragments() {
        let mut store = LocalStore::new(MemoryStore::new());
        store.write(Some("u1"), 2025, &sample_document());
        store.clear(Some("u1"), 2025);
        assert_eq!(store.read(Some("u1"), 2025), CalendarDocument::default());
        assert!(store.kv().is_empty());
    }

    #[test]
    fn metadata_defaults_then_round_trips() {
        let mut store = LocalStore::new(MemoryStore::new());
        let key = SyncKey::new("u1", 2025);

        let meta = store.sync_metadata(&key);
        assert_eq!(meta.last_sync, 0);
        assert_eq!(meta.last_local_change, 0);

        let updated = SyncMetadata {
            last_sync: 1_700_000_000_000,
            last_local_change: 1_700_000_000_500,
            ..meta
        };
        store.set_sync_metadata(&updated);
        assert_eq!(store.sync_metadata(&key).last_sync, 1_700_000_000_000);
    }

    #[test]
    fn stored_hash_starts_absent() {
        let mut store = LocalStore::new(MemoryStore::new());
        let key = SyncKey::new("u1", 2025);
        assert!(store.stored_hash(&key).is_none());
        store.set_stored_hash(&key, "abc123");
        assert_eq!(store.stored_hash(&key).as_deref(), Some("abc123"));
    }
}
