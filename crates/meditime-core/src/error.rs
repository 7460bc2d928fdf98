//! Core error types for meditime-core.
//!
//! Every fallible operation in the library returns one of these typed
//! errors; nothing in the core panics past its boundary.

use thiserror::Error;

use crate::timer::TimerState;

/// Top-level error type for meditime-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer state machine rejected an operation
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Persistence boundary failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Playback collaborator failure
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

/// Errors raised by the timer state machine.
#[derive(Error, Debug)]
pub enum TimerError {
    /// The requested operation is illegal in the current state
    /// (e.g. `pause` while `Idle`). The session state is unchanged.
    #[error("cannot {operation} while {state:?}")]
    InvalidStateTransition {
        state: TimerState,
        operation: &'static str,
    },

    /// Duration or chime interval outside the allowed range.
    #[error("invalid {field}: {value} (allowed: {allowed})")]
    InvalidConfiguration {
        field: &'static str,
        value: u32,
        allowed: &'static str,
    },
}

/// Persistence-boundary errors.
///
/// Callers that hold a running session degrade to in-memory state on
/// these instead of aborting the countdown.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown config key: {0}")]
    UnknownConfigKey(String),

    #[error("cannot parse '{value}' for config key {key}")]
    InvalidConfigValue { key: String, value: String },
}

/// Playback collaborator errors.
///
/// Never affect timer correctness; the session service converts them
/// into non-fatal [`Event::PlaybackUnavailable`](crate::Event) events.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("resource '{0}' not found")]
    UnknownResource(String),

    #[error("playback blocked for '{resource}': {reason}")]
    Blocked { resource: String, reason: String },
}
