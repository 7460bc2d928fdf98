//! Per-day meditation history model.
//!
//! One [`DayRecord`] exists per calendar day with at least one recorded
//! session. The map is keyed by local calendar day; serde renders
//! `NaiveDate` keys as canonical `YYYY-MM-DD` strings, which is also the
//! on-disk blob format.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate of all sessions recorded on one calendar day.
///
/// Invariant: a record exists only for days with at least one session of
/// at least one minute, so `session_count >= 1` and `total_minutes >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub total_minutes: u32,
    pub session_count: u32,
}

/// Day key -> aggregate. BTreeMap keeps both traversal orders cheap for
/// the statistics engine.
pub type History = BTreeMap<NaiveDate, DayRecord>;

/// Merge one session of `minutes` into `history` under `date`.
///
/// Creates the day entry if absent, otherwise adds to it. Callers must
/// not pass zero minutes; the recorder filters those out first.
pub fn merge_session(history: &mut History, date: NaiveDate, minutes: u32) -> DayRecord {
    let entry = history
        .entry(date)
        .and_modify(|day| {
            day.total_minutes += minutes;
            day.session_count += 1;
        })
        .or_insert(DayRecord {
            total_minutes: minutes,
            session_count: 1,
        });
    *entry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn first_session_creates_day_entry() {
        let mut history = History::new();
        let rec = merge_session(&mut history, day("2025-06-01"), 15);
        assert_eq!(rec.total_minutes, 15);
        assert_eq!(rec.session_count, 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn same_day_sessions_merge() {
        let mut history = History::new();
        merge_session(&mut history, day("2025-06-01"), 15);
        let rec = merge_session(&mut history, day("2025-06-01"), 20);
        assert_eq!(rec.total_minutes, 35);
        assert_eq!(rec.session_count, 2);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn day_keys_serialize_as_date_strings() {
        let mut history = History::new();
        merge_session(&mut history, day("2025-06-01"), 10);
        let json = serde_json::to_string(&history).unwrap();
        assert!(json.contains("\"2025-06-01\""));

        let parsed: History = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, history);
    }
}
