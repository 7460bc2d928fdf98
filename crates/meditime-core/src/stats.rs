//! Statistics engine.
//!
//! Pure reads over [`History`]; nothing here mutates state. Streaks key
//! entirely on calendar-day granularity: two sessions 30 hours apart
//! still count as consecutive when their day keys are adjacent.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::history::History;

/// Aggregate snapshot for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_minutes: u64,
    pub total_sessions: u64,
    pub days_meditated: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Build a [`Summary`] as of `today`.
pub fn summary(history: &History, today: NaiveDate) -> Summary {
    Summary {
        total_minutes: total_minutes(history),
        total_sessions: history.values().map(|d| u64::from(d.session_count)).sum(),
        days_meditated: history.len() as u64,
        current_streak: current_streak(history, today),
        longest_streak: longest_streak(history),
    }
}

/// Sum of recorded minutes over all days.
pub fn total_minutes(history: &History) -> u64 {
    history.values().map(|d| u64::from(d.total_minutes)).sum()
}

/// Length of the unbroken consecutive-day run ending at the most recent
/// recorded day, or 0 when that day is more than one calendar day before
/// `today` (a missed day breaks the streak even if today hasn't ended).
pub fn current_streak(history: &History, today: NaiveDate) -> u32 {
    let Some(most_recent) = history.keys().next_back().copied() else {
        return 0;
    };
    let yesterday = today - Days::new(1);
    if most_recent < yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = most_recent;
    for &day in history.keys().rev().skip(1) {
        if cursor - Days::new(1) != day {
            break;
        }
        streak += 1;
        cursor = day;
    }
    streak
}

/// Longest run of consecutive days anywhere in the history. A single
/// isolated day counts as a streak of 1.
pub fn longest_streak(history: &History) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for &day in history.keys() {
        run = match prev {
            Some(p) if p + Days::new(1) == day => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}

/// Day-of-month numbers with at least one session in the given month.
pub fn meditated_days_in_month(history: &History, year: i32, month: u32) -> BTreeSet<u32> {
    use chrono::Datelike;
    history
        .keys()
        .filter(|d| d.year() == year && d.month() == month)
        .map(|d| d.day())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::merge_session;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn history_of(days: &[(&str, u32)]) -> History {
        let mut history = History::new();
        for &(d, minutes) in days {
            merge_session(&mut history, day(d), minutes);
        }
        history
    }

    #[test]
    fn empty_history_yields_zeroes() {
        let history = History::new();
        assert_eq!(total_minutes(&history), 0);
        assert_eq!(current_streak(&history, day("2025-06-10")), 0);
        assert_eq!(longest_streak(&history), 0);
    }

    #[test]
    fn total_minutes_sums_all_days() {
        let history = history_of(&[("2025-06-01", 10), ("2025-06-03", 25)]);
        assert_eq!(total_minutes(&history), 35);
    }

    #[test]
    fn streak_ending_today_counts_back_to_first_gap() {
        let history = history_of(&[
            ("2025-06-05", 10),
            ("2025-06-08", 10),
            ("2025-06-09", 10),
            ("2025-06-10", 10),
        ]);
        assert_eq!(current_streak(&history, day("2025-06-10")), 3);
    }

    #[test]
    fn streak_ending_yesterday_still_counts() {
        let history = history_of(&[("2025-06-08", 10), ("2025-06-09", 10)]);
        assert_eq!(current_streak(&history, day("2025-06-10")), 2);
    }

    #[test]
    fn missed_day_breaks_current_streak() {
        // Most recent day is two days before today.
        let history = history_of(&[("2025-06-07", 10), ("2025-06-08", 10)]);
        assert_eq!(current_streak(&history, day("2025-06-10")), 0);
    }

    #[test]
    fn single_day_is_streak_of_one() {
        let history = history_of(&[("2025-06-10", 10)]);
        assert_eq!(current_streak(&history, day("2025-06-10")), 1);
        assert_eq!(longest_streak(&history), 1);
    }

    #[test]
    fn longest_streak_finds_run_of_three() {
        // {D1, D1+1, D1+2, D4, D4+1} with D4 >= D1+4 -> 3.
        let history = history_of(&[
            ("2025-06-01", 10),
            ("2025-06-02", 10),
            ("2025-06-03", 10),
            ("2025-06-07", 10),
            ("2025-06-08", 10),
        ]);
        assert_eq!(longest_streak(&history), 3);
    }

    #[test]
    fn longest_streak_spans_month_boundary() {
        let history = history_of(&[("2025-05-31", 10), ("2025-06-01", 10)]);
        assert_eq!(longest_streak(&history), 2);
    }

    #[test]
    fn meditated_days_filters_by_month() {
        let history = history_of(&[
            ("2025-05-31", 10),
            ("2025-06-01", 10),
            ("2025-06-15", 10),
            ("2026-06-02", 10),
        ]);
        let days = meditated_days_in_month(&history, 2025, 6);
        assert_eq!(days.into_iter().collect::<Vec<_>>(), vec![1, 15]);
    }

    #[test]
    fn summary_aggregates_everything() {
        let mut history = history_of(&[("2025-06-09", 15), ("2025-06-10", 10)]);
        merge_session(&mut history, day("2025-06-10"), 20);

        let s = summary(&history, day("2025-06-10"));
        assert_eq!(s.total_minutes, 45);
        assert_eq!(s.total_sessions, 3);
        assert_eq!(s.days_meditated, 2);
        assert_eq!(s.current_streak, 2);
        assert_eq!(s.longest_streak, 2);
    }
}
