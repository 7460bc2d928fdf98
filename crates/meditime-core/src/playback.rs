//! Playback collaborator boundary.
//!
//! Ambient sounds, the interval/end chimes, and the background video are
//! opaque resources the core merely starts and stops. Calls are
//! fire-and-forget: the session service never blocks on playback, and a
//! collaborator failure (autoplay policy, missing file) must not affect
//! the countdown. Errors returned here are converted into non-fatal
//! [`Event::PlaybackUnavailable`](crate::Event) events.

use crate::error::PlaybackError;

pub trait Playback {
    /// Begin looping playback of `resource` at `volume` (0-100).
    fn begin(&mut self, resource: &str, volume: u8) -> Result<(), PlaybackError>;

    /// Pause `resource`, keeping its position.
    fn pause(&mut self, resource: &str) -> Result<(), PlaybackError>;

    /// Stop `resource` and rewind it.
    fn stop(&mut self, resource: &str) -> Result<(), PlaybackError>;

    /// Fade `resource` out, then stop it. The fade runs on the
    /// collaborator's side; callers do not wait for it.
    fn fade_out_then_stop(&mut self, resource: &str) -> Result<(), PlaybackError>;
}

/// Playback implementation that plays nothing. Used by headless front
/// ends and wherever sound output is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlayback;

impl Playback for NullPlayback {
    fn begin(&mut self, _resource: &str, _volume: u8) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn pause(&mut self, _resource: &str) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn stop(&mut self, _resource: &str) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn fade_out_then_stop(&mut self, _resource: &str) -> Result<(), PlaybackError> {
        Ok(())
    }
}
