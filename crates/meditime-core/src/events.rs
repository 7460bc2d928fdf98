use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every observable change in the core produces an Event.
///
/// Events are the UI notification boundary: the core emits them and does
/// not know how they are rendered. A front end matches on the variants it
/// cares about and ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The state machine moved to a new state.
    StateChanged { state: TimerState },
    TimerStarted {
        duration_min: u32,
        interval_chime_min: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Session stopped before completion. `elapsed_secs` counts running
    /// ticks only, never paused time.
    TimerStopped {
        elapsed_secs: u32,
        at: DateTime<Utc>,
    },
    /// One second elapsed while running.
    Tick { remaining_secs: u32 },
    /// Remaining whole minutes crossed a boundary divisible by the
    /// configured chime interval.
    IntervalChime { remaining_min: u32 },
    /// Countdown reached zero.
    TimerCompleted {
        duration_min: u32,
        at: DateTime<Utc>,
    },
    /// A session was merged into the history for `date`.
    SessionRecorded {
        date: NaiveDate,
        minutes: u32,
        day_total_minutes: u32,
        day_session_count: u32,
    },
    /// Completion notice for the UI, emitted after the fade-out signal
    /// and the history write.
    SessionCompleted {
        total_minutes: u32,
        at: DateTime<Utc>,
    },
    /// A playback collaborator failed; the countdown is unaffected.
    PlaybackUnavailable { resource: String, detail: String },
    /// The persistence boundary failed; the session continues on
    /// in-memory state.
    PersistenceUnavailable { detail: String },
}
