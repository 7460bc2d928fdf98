//! Session service.
//!
//! Wires the countdown engine to its collaborators: persists the
//! last-used settings when a session starts, forwards playback signals,
//! and bridges completion/stop into the session recorder. This is the
//! only component with side effects; the engine stays pure.
//!
//! Ordering guarantee on completion: the fade-out/stop signal is issued
//! to playback before the history is written and before the completion
//! notice event, per the session lifecycle contract. The fade itself is
//! fire-and-forget.

use chrono::Utc;

use crate::clock::Clock;
use crate::error::TimerError;
use crate::events::Event;
use crate::playback::Playback;
use crate::recorder;
use crate::storage::settings::TimerSettings;
use crate::storage::Storage;
use crate::timer::engine::{TimerEngine, TimerState};

/// Resource id handed to the playback collaborator for the ambient
/// background video.
pub const VIDEO_RESOURCE: &str = "background-video";
/// Resource id for the interval/end chime.
pub const CHIME_RESOURCE: &str = "chime";

/// Minimum elapsed running time before a stopped session is recorded.
pub const MIN_RECORD_SECS: u32 = 60;

pub struct TimerService {
    engine: TimerEngine,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    playback: Box<dyn Playback>,
    settings: TimerSettings,
    background_video: bool,
}

impl TimerService {
    pub fn new(
        storage: Box<dyn Storage>,
        clock: Box<dyn Clock>,
        playback: Box<dyn Playback>,
    ) -> Self {
        Self {
            engine: TimerEngine::new(),
            storage,
            clock,
            playback,
            settings: TimerSettings::default(),
            background_video: true,
        }
    }

    /// Disable the background-video collaborator for this service.
    pub fn set_background_video(&mut self, enabled: bool) {
        self.background_video = enabled;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.engine.remaining_secs()
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn storage(&self) -> &dyn Storage {
        &*self.storage
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a session with an explicit configuration.
    ///
    /// The full configuration (including the sound selection supplied by
    /// the UI collaborator) becomes the new last-used settings. Storage
    /// and playback failures degrade to events; only an engine rejection
    /// is an error.
    pub fn start(&mut self, settings: TimerSettings) -> Result<Vec<Event>, TimerError> {
        let started = self
            .engine
            .start(settings.duration_min, settings.interval_chime_min)?;
        self.settings = settings;

        let mut events = vec![
            Event::StateChanged {
                state: TimerState::Running,
            },
            started,
        ];

        if let Err(e) = self.settings.save(&*self.storage) {
            events.push(Event::PersistenceUnavailable {
                detail: e.to_string(),
            });
        }

        let playback = &mut self.playback;
        for (name, sound) in self.settings.active_sounds() {
            if let Err(e) = playback.begin(name, sound.volume) {
                events.push(Event::PlaybackUnavailable {
                    resource: name.to_string(),
                    detail: e.to_string(),
                });
            }
        }
        if self.background_video {
            if let Err(e) = playback.begin(VIDEO_RESOURCE, 100) {
                events.push(Event::PlaybackUnavailable {
                    resource: VIDEO_RESOURCE.to_string(),
                    detail: e.to_string(),
                });
            }
        }

        Ok(events)
    }

    /// Quick start: begin a session with the stored last-used settings,
    /// or the defaults when nothing usable is stored.
    pub fn start_with_last_settings(&mut self) -> Result<Vec<Event>, TimerError> {
        let (settings, degraded) = match TimerSettings::load(&*self.storage) {
            Ok(s) => (s, None),
            Err(e) => (
                TimerSettings::default(),
                Some(Event::PersistenceUnavailable {
                    detail: e.to_string(),
                }),
            ),
        };
        let mut events = self.start(settings)?;
        if let Some(event) = degraded {
            events.push(event);
        }
        Ok(events)
    }

    pub fn pause(&mut self) -> Result<Vec<Event>, TimerError> {
        let paused = self.engine.pause()?;
        let mut events = vec![
            Event::StateChanged {
                state: TimerState::Paused,
            },
            paused,
        ];
        self.signal_active(&mut events, |p, resource| p.pause(resource));
        Ok(events)
    }

    pub fn resume(&mut self) -> Result<Vec<Event>, TimerError> {
        let resumed = self.engine.resume()?;
        let mut events = vec![
            Event::StateChanged {
                state: TimerState::Running,
            },
            resumed,
        ];
        let playback = &mut self.playback;
        for (name, sound) in self.settings.active_sounds() {
            if let Err(e) = playback.begin(name, sound.volume) {
                events.push(Event::PlaybackUnavailable {
                    resource: name.to_string(),
                    detail: e.to_string(),
                });
            }
        }
        if self.background_video {
            if let Err(e) = playback.begin(VIDEO_RESOURCE, 100) {
                events.push(Event::PlaybackUnavailable {
                    resource: VIDEO_RESOURCE.to_string(),
                    detail: e.to_string(),
                });
            }
        }
        Ok(events)
    }

    /// Stop the current session, recording it when at least
    /// [`MIN_RECORD_SECS`] of running time elapsed.
    pub fn stop(&mut self) -> Result<Vec<Event>, TimerError> {
        let elapsed_secs = self.engine.elapsed_secs();
        let stopped = self.engine.stop()?;

        let mut events = vec![
            Event::StateChanged {
                state: TimerState::Stopped,
            },
            stopped,
        ];
        self.signal_active(&mut events, |p, resource| p.stop(resource));

        if elapsed_secs >= MIN_RECORD_SECS {
            self.record(&mut events, elapsed_secs / 60);
        }
        Ok(events)
    }

    /// Advance the countdown by one second and run any completion
    /// side effects.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        for event in self.engine.tick() {
            match event {
                Event::IntervalChime { remaining_min } => {
                    if let Err(e) = self.playback.begin(CHIME_RESOURCE, 100) {
                        events.push(Event::PlaybackUnavailable {
                            resource: CHIME_RESOURCE.to_string(),
                            detail: e.to_string(),
                        });
                    }
                    events.push(Event::IntervalChime { remaining_min });
                }
                Event::TimerCompleted { duration_min, at } => {
                    events.push(Event::StateChanged {
                        state: TimerState::Completed,
                    });
                    events.push(Event::TimerCompleted { duration_min, at });
                    self.complete(&mut events, duration_min);
                }
                other => events.push(other),
            }
        }
        events
    }

    /// Completion path: end chime, fade-out signals, then the history
    /// write, then the completion notice. Natural completion records the
    /// full nominal duration.
    fn complete(&mut self, events: &mut Vec<Event>, duration_min: u32) {
        if let Err(e) = self.playback.begin(CHIME_RESOURCE, 100) {
            events.push(Event::PlaybackUnavailable {
                resource: CHIME_RESOURCE.to_string(),
                detail: e.to_string(),
            });
        }
        self.signal_active(events, |p, resource| p.fade_out_then_stop(resource));

        self.record(events, duration_min);

        events.push(Event::SessionCompleted {
            total_minutes: duration_min,
            at: Utc::now(),
        });
    }

    fn record(&mut self, events: &mut Vec<Event>, minutes: u32) {
        match recorder::record(&*self.storage, self.clock.today(), minutes) {
            Ok(Some(day)) => events.push(Event::SessionRecorded {
                date: self.clock.today(),
                minutes,
                day_total_minutes: day.total_minutes,
                day_session_count: day.session_count,
            }),
            Ok(None) => {}
            Err(e) => events.push(Event::PersistenceUnavailable {
                detail: e.to_string(),
            }),
        }
    }

    /// Send one playback signal to every active resource, collecting
    /// failures as non-fatal events.
    fn signal_active<F>(&mut self, events: &mut Vec<Event>, mut signal: F)
    where
        F: FnMut(&mut dyn Playback, &str) -> Result<(), crate::error::PlaybackError>,
    {
        let playback = &mut *self.playback;
        for (name, _) in self.settings.active_sounds() {
            if let Err(e) = signal(playback, name) {
                events.push(Event::PlaybackUnavailable {
                    resource: name.to_string(),
                    detail: e.to_string(),
                });
            }
        }
        if self.background_video {
            if let Err(e) = signal(playback, VIDEO_RESOURCE) {
                events.push(Event::PlaybackUnavailable {
                    resource: VIDEO_RESOURCE.to_string(),
                    detail: e.to_string(),
                });
            }
        }
    }
}
