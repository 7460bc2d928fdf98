mod engine;
mod service;

pub use engine::{TimerEngine, TimerState, MAX_DURATION_MIN, MIN_DURATION_MIN};
pub use service::{TimerService, CHIME_RESOURCE, MIN_RECORD_SECS, VIDEO_RESOURCE};
