//! Countdown state machine.
//!
//! The engine has no internal thread and performs no I/O: the caller
//! drives it by invoking `tick()` once per elapsed second while running
//! (the CLI run loop or a UI shell owns the 1000 ms schedule). One
//! `tick()` equals one second, so paused time never enters the elapsed
//! accounting and tests can run whole sessions instantly.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running -> (Paused -> Running | Stopped | Completed)
//! ```
//!
//! `Stopped` and `Completed` are terminal for a session instance; a new
//! `start` begins a fresh session.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::TimerError;
use crate::events::Event;

/// Allowed session duration range in minutes.
pub const MIN_DURATION_MIN: u32 = 1;
pub const MAX_DURATION_MIN: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Stopped,
    Completed,
}

/// Core countdown engine.
///
/// Owns the ephemeral session state; invalid operations are rejected
/// with a typed error and never corrupt it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    total_secs: u32,
    remaining_secs: u32,
    interval_chime_min: u32,
    /// Remaining seconds at the previous chime check; the chime rule
    /// compares whole-minute counts across this checkpoint.
    last_chime_checkpoint_secs: u32,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            total_secs: 0,
            remaining_secs: 0,
            interval_chime_min: 0,
            last_chime_checkpoint_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn duration_min(&self) -> u32 {
        self.total_secs / 60
    }

    pub fn interval_chime_min(&self) -> u32 {
        self.interval_chime_min
    }

    /// Seconds counted while running. Paused time is never included.
    pub fn elapsed_secs(&self) -> u32 {
        self.total_secs - self.remaining_secs
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh session.
    ///
    /// Rejected while a session is live (`Running` or `Paused`); callers
    /// resume or stop the current session first.
    pub fn start(&mut self, duration_min: u32, interval_chime_min: u32) -> Result<Event, TimerError> {
        match self.state {
            TimerState::Running | TimerState::Paused => {
                return Err(TimerError::InvalidStateTransition {
                    state: self.state,
                    operation: "start",
                })
            }
            TimerState::Idle | TimerState::Stopped | TimerState::Completed => {}
        }
        if !(MIN_DURATION_MIN..=MAX_DURATION_MIN).contains(&duration_min) {
            return Err(TimerError::InvalidConfiguration {
                field: "duration_min",
                value: duration_min,
                allowed: "1-120",
            });
        }

        self.total_secs = duration_min * 60;
        self.remaining_secs = self.total_secs;
        self.interval_chime_min = interval_chime_min;
        self.last_chime_checkpoint_secs = self.total_secs;
        self.state = TimerState::Running;

        Ok(Event::TimerStarted {
            duration_min,
            interval_chime_min,
            at: Utc::now(),
        })
    }

    /// Halt the countdown, keeping the remaining time.
    pub fn pause(&mut self) -> Result<Event, TimerError> {
        if self.state != TimerState::Running {
            return Err(TimerError::InvalidStateTransition {
                state: self.state,
                operation: "pause",
            });
        }
        self.state = TimerState::Paused;
        Ok(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Continue a paused countdown without resetting the remaining time.
    pub fn resume(&mut self) -> Result<Event, TimerError> {
        if self.state != TimerState::Paused {
            return Err(TimerError::InvalidStateTransition {
                state: self.state,
                operation: "resume",
            });
        }
        self.state = TimerState::Running;
        Ok(Event::TimerResumed {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// End the session early.
    ///
    /// Reports the elapsed running seconds and resets the display to the
    /// full duration. Whether the session is recorded is the session
    /// service's decision (minimum-duration rule).
    pub fn stop(&mut self) -> Result<Event, TimerError> {
        match self.state {
            TimerState::Running | TimerState::Paused => {}
            _ => {
                return Err(TimerError::InvalidStateTransition {
                    state: self.state,
                    operation: "stop",
                })
            }
        }
        let elapsed_secs = self.elapsed_secs();
        self.remaining_secs = self.total_secs;
        self.state = TimerState::Stopped;
        Ok(Event::TimerStopped {
            elapsed_secs,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing outside `Running`, so a stale tick source can never
    /// touch a paused or finished session. Emits no I/O; the returned
    /// events are the only effect.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.state != TimerState::Running {
            return Vec::new();
        }

        self.remaining_secs -= 1;

        if self.remaining_secs == 0 {
            // Completion path; zero remaining minutes never chimes.
            self.state = TimerState::Completed;
            return vec![Event::TimerCompleted {
                duration_min: self.duration_min(),
                at: Utc::now(),
            }];
        }

        let mut events = Vec::with_capacity(2);
        let prev_min = self.last_chime_checkpoint_secs / 60;
        let curr_min = self.remaining_secs / 60;
        if self.interval_chime_min > 0
            && curr_min > 0
            && curr_min < prev_min
            && curr_min % self.interval_chime_min == 0
        {
            events.push(Event::IntervalChime {
                remaining_min: curr_min,
            });
        }
        self.last_chime_checkpoint_secs = self.remaining_secs;

        events.push(Event::Tick {
            remaining_secs: self.remaining_secs,
        });
        events
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
