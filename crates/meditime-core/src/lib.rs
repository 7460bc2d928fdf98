//! # Meditime Core Library
//!
//! Core business logic for the Meditime meditation timer: the countdown
//! state machine, the per-day session history with streak statistics,
//! and the durable last-used settings. Front ends (CLI, desktop, web
//! shell) are thin adapters over this crate.
//!
//! ## Architecture
//!
//! - **Timer engine**: a caller-ticked state machine -- one `tick()`
//!   equals one elapsed second, so paused time never counts and tests
//!   drive whole sessions without real time passing
//! - **Session service**: the only side-effecting component; persists
//!   settings on start, signals playback collaborators, and records
//!   finished sessions
//! - **Storage**: key-value blobs in SQLite plus TOML application
//!   configuration
//! - **Collaborator traits**: [`Playback`] and [`Clock`] seams keep
//!   audio/video and wall-clock concerns out of the core
//!
//! ## Key components
//!
//! - [`TimerEngine`] / [`TimerService`]: countdown state machine and its
//!   orchestration
//! - [`stats`]: pure statistics over the session history
//! - [`TimerSettings`] / [`Config`]: durable configuration

pub mod clock;
pub mod error;
pub mod events;
pub mod history;
pub mod playback;
pub mod recorder;
pub mod stats;
pub mod storage;
pub mod timer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, PlaybackError, StorageError, TimerError};
pub use events::Event;
pub use history::{DayRecord, History};
pub use playback::{NullPlayback, Playback};
pub use stats::Summary;
pub use storage::settings::{SoundSetting, Theme, TimerSettings};
pub use storage::{Config, MemoryStorage, SqliteStorage, Storage};
pub use timer::{TimerEngine, TimerService, TimerState};
