//! Session recorder.
//!
//! The sole write path into the history: resolves "today" at the moment
//! of invocation, then atomically merges the session into the stored
//! blob (whole-object read, mutate, replace).

use chrono::NaiveDate;

use crate::error::StorageError;
use crate::history::{merge_session, DayRecord};
use crate::storage::{history, Storage};

/// Merge a session of `minutes` into the history under `today`.
///
/// No-op for zero minutes; sessions shorter than a whole minute never
/// reach the history. Returns the updated day aggregate when a session
/// was recorded.
pub fn record(
    storage: &dyn Storage,
    today: NaiveDate,
    minutes: u32,
) -> Result<Option<DayRecord>, StorageError> {
    if minutes == 0 {
        return Ok(None);
    }

    let mut full = history::load(storage)?;
    let day = merge_session(&mut full, today, minutes);
    history::save(storage, &full)?;
    Ok(Some(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn zero_minutes_records_nothing() {
        let storage = MemoryStorage::new();
        assert!(record(&storage, day("2025-06-10"), 0).unwrap().is_none());
        assert!(history::load(&storage).unwrap().is_empty());
    }

    #[test]
    fn two_sessions_same_day_merge_into_one_record() {
        let storage = MemoryStorage::new();
        record(&storage, day("2025-06-10"), 15).unwrap();
        let rec = record(&storage, day("2025-06-10"), 20).unwrap().unwrap();

        assert_eq!(rec.total_minutes, 35);
        assert_eq!(rec.session_count, 2);

        let full = history::load(&storage).unwrap();
        assert_eq!(full.len(), 1);
    }

    #[test]
    fn sessions_on_different_days_stay_separate() {
        let storage = MemoryStorage::new();
        record(&storage, day("2025-06-10"), 10).unwrap();
        record(&storage, day("2025-06-11"), 10).unwrap();
        assert_eq!(history::load(&storage).unwrap().len(), 2);
    }
}
