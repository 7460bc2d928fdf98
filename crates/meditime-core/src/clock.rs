//! Injected clock boundary.
//!
//! The core never reads wall-clock time directly: "today" for day
//! bucketing and streak computation comes through [`Clock`]. The 1000 ms
//! repetition that drives `tick()` lives in the caller (CLI run loop or
//! UI shell), so a test can drive any number of ticks without real time
//! passing.

use chrono::{DateTime, Local, NaiveDate};

pub trait Clock {
    /// Current local date/time.
    fn now(&self) -> DateTime<Local>;

    /// Current local calendar day.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock implementation used by real front ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Settable clock for deterministic tests and headless drivers.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: std::cell::Cell<DateTime<Local>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: std::cell::Cell::new(now),
        }
    }

    /// Pin the clock to noon of the given day. Noon avoids the DST
    /// transitions that can make midnight ambiguous.
    pub fn at_day(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).expect("noon is a valid time");
        let now = noon
            .and_local_timezone(Local)
            .earliest()
            .expect("noon exists in every time zone");
        Self::new(now)
    }

    pub fn set(&self, now: DateTime<Local>) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}
