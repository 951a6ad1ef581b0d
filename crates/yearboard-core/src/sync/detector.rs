//! Change detection for local calendar data.
//!
//! A cheap non-cryptographic content hash decides whether local data
//! drifted since the last sync. The accumulator is the one the web client
//! computes (`h = (h << 5) - h + unit` over UTF-16 code units, folded to
//! base 36). The hash is a local equality witness per key: it compares a
//! document against the serialization this client stored at the last sync,
//! not against bytes another client may have produced.
//!
//! Reading is side-effect free; only the sync engine stores a new hash, and
//! only after a confirmed push or pull.

use crate::storage::{KvStore, LocalStore};

use super::SyncKey;

/// 32-bit rolling hash over UTF-16 code units, base-36 encoded.
pub fn content_hash(input: &str) -> String {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    let mut encoded = to_base36(hash.unsigned_abs());
    encoded.truncate(16);
    encoded
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    while value > 0 {
        out.insert(0, char::from(DIGITS[(value % 36) as usize]));
        value /= 36;
    }
    out
}

/// Hash of the current local document for `(user, year)`.
pub fn document_hash<S: KvStore>(local: &LocalStore<S>, user: Option<&str>, year: i32) -> String {
    let doc = local.read(user, year);
    match serde_json::to_string(&doc) {
        Ok(json) => content_hash(&json),
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize document for hashing");
            String::new()
        }
    }
}

/// Whether local data for the key changed since the last sync.
///
/// With no previously stored hash (first sync for this key), falls back to
/// a heuristic: "has changes" iff the document holds anything at all. This
/// bootstraps first-sync behavior without a network round trip just to
/// discover emptiness.
pub fn has_local_changes<S: KvStore>(local: &LocalStore<S>, key: &SyncKey) -> bool {
    let user = Some(key.user_id.as_str());
    match local.stored_hash(key) {
        Some(previous) => document_hash(local, user, key.year) != previous,
        None => !local.read(user, key.year).is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarDocument, MonthlyTopic, QuarterlyNote, StickerEvent};
    use crate::storage::MemoryStore;
    use proptest::prelude::*;

    fn store_with(doc: &CalendarDocument) -> LocalStore<MemoryStore> {
        let mut store = LocalStore::new(MemoryStore::new());
        store.write(Some("u1"), 2025, doc);
        store
    }

    fn fitness_document() -> CalendarDocument {
        let mut doc = CalendarDocument::default();
        doc.month_mut(1).unwrap().topics[0] = MonthlyTopic {
            name: "Fitness".into(),
            events: vec![StickerEvent::new(5, 7, "Gym")],
        };
        doc
    }

    #[test]
    fn known_hash_values() {
        // Matches the web client's hash for the same inputs.
        assert_eq!(content_hash(""), "0");
        assert_eq!(content_hash("a"), "2p"); // 97 = 2 * 36 + 25
    }

    #[test]
    fn hash_is_stable_for_unmodified_document() {
        let store = store_with(&fitness_document());
        let first = document_hash(&store, Some("u1"), 2025);
        let second = document_hash(&store, Some("u1"), 2025);
        assert_eq!(first, second);
        assert!(!first.is_empty());
        assert!(first.len() <= 16);
    }

    #[test]
    fn any_field_edit_changes_the_hash() {
        let base = fitness_document();
        let base_hash = {
            let store = store_with(&base);
            document_hash(&store, Some("u1"), 2025)
        };

        let mut renamed = base.clone();
        renamed.month_mut(1).unwrap().topics[0].events[0].name = "Gym Session".into();

        let mut recolored = base.clone();
        recolored.month_mut(1).unwrap().topics[0].events[0].color = Some("#00ff00".into());

        let mut shifted = base.clone();
        shifted.month_mut(1).unwrap().topics[0].events[0].end = 9;

        let mut noted = base.clone();
        noted
            .notes
            .entry(1)
            .or_default()
            .push(QuarterlyNote::new(0, 0, "stretch"));

        for edited in [renamed, recolored, shifted, noted] {
            let store = store_with(&edited);
            assert_ne!(document_hash(&store, Some("u1"), 2025), base_hash);
        }
    }

    #[test]
    fn empty_document_without_stored_hash_has_no_changes() {
        let store = LocalStore::new(MemoryStore::new());
        assert!(!has_local_changes(&store, &SyncKey::new("u1", 2025)));
    }

    #[test]
    fn non_empty_document_without_stored_hash_has_changes() {
        let store = store_with(&fitness_document());
        assert!(has_local_changes(&store, &SyncKey::new("u1", 2025)));
    }

    #[test]
    fn stored_hash_wins_over_heuristic() {
        let mut store = store_with(&fitness_document());
        let key = SyncKey::new("u1", 2025);

        // Pretend the engine just synced: stored hash matches current data.
        let hash = document_hash(&store, Some("u1"), 2025);
        store.set_stored_hash(&key, &hash);
        assert!(!has_local_changes(&store, &key));

        // A user edit drifts the document away from the stored hash.
        let mut doc = store.read(Some("u1"), 2025);
        doc.month_mut(1).unwrap().topics[0].events[0].name = "Gym Session".into();
        store.write(Some("u1"), 2025, &doc);
        assert!(has_local_changes(&store, &key));
    }

    proptest! {
        #[test]
        fn hash_is_deterministic_and_bounded(input in ".*") {
            let a = content_hash(&input);
            let b = content_hash(&input);
            prop_assert_eq!(&a, &b);
            prop_assert!(a.len() <= 16);
            prop_assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }
}
