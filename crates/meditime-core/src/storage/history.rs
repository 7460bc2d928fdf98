//! History blob persistence.
//!
//! The entire history is one JSON object keyed by `YYYY-MM-DD` day
//! strings. Readers get the whole map; the recorder replaces the whole
//! map. An unreadable or absent blob loads as empty history so a corrupt
//! entry can never take the timer down.

use crate::error::StorageError;
use crate::history::History;
use crate::storage::{Storage, HISTORY_KEY};

/// Load the full history, or an empty one when nothing usable is stored.
pub fn load(storage: &dyn Storage) -> Result<History, StorageError> {
    match storage.read(HISTORY_KEY)? {
        Some(blob) => Ok(serde_json::from_str(&blob).unwrap_or_default()),
        None => Ok(History::new()),
    }
}

/// Replace the stored history.
pub fn save(storage: &dyn Storage, history: &History) -> Result<(), StorageError> {
    let blob = serde_json::to_string(history)?;
    storage.write(HISTORY_KEY, &blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::merge_session;
    use crate::storage::MemoryStorage;

    #[test]
    fn absent_blob_loads_as_empty() {
        let storage = MemoryStorage::new();
        assert!(load(&storage).unwrap().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_as_empty() {
        let storage = MemoryStorage::new();
        storage.write(HISTORY_KEY, "not json").unwrap();
        assert!(load(&storage).unwrap().is_empty());
    }

    #[test]
    fn history_roundtrip() {
        let storage = MemoryStorage::new();
        let mut history = History::new();
        merge_session(&mut history, "2025-06-01".parse().unwrap(), 20);
        merge_session(&mut history, "2025-06-02".parse().unwrap(), 5);

        save(&storage, &history).unwrap();
        assert_eq!(load(&storage).unwrap(), history);
    }
}
