//! Last-used timer configuration and theme preference.
//!
//! `TimerSettings` is overwritten in full every time a session starts
//! and read once at timer initialization; a missing or unreadable blob
//! yields the defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::{Storage, SETTINGS_KEY, THEME_KEY};

/// Enabled/volume state for one ambient sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundSetting {
    pub active: bool,
    /// 0-100.
    pub volume: u8,
}

/// The last-used timer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// 1-120.
    pub duration_min: u32,
    /// 0 disables the interval chime.
    pub interval_chime_min: u32,
    pub sounds: BTreeMap<String, SoundSetting>,
}

impl Default for TimerSettings {
    fn default() -> Self {
        let mut sounds = BTreeMap::new();
        sounds.insert(
            "rain".to_string(),
            SoundSetting {
                active: false,
                volume: 70,
            },
        );
        Self {
            duration_min: 10,
            interval_chime_min: 0,
            sounds,
        }
    }
}

impl TimerSettings {
    /// Names of the sounds currently toggled on.
    pub fn active_sounds(&self) -> impl Iterator<Item = (&str, &SoundSetting)> {
        self.sounds
            .iter()
            .filter(|(_, s)| s.active)
            .map(|(name, s)| (name.as_str(), s))
    }

    /// Load the last-used settings. An absent or unparseable blob yields
    /// the defaults.
    pub fn load(storage: &dyn Storage) -> Result<Self, StorageError> {
        match storage.read(SETTINGS_KEY)? {
            Some(blob) => Ok(serde_json::from_str(&blob).unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }

    /// Persist these settings, replacing whatever was stored.
    pub fn save(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        let blob = serde_json::to_string(self)?;
        storage.write(SETTINGS_KEY, &blob)
    }
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Load the stored preference; light when nothing is stored.
    pub fn load(storage: &dyn Storage) -> Result<Self, StorageError> {
        Ok(match storage.read(THEME_KEY)?.as_deref() {
            Some("true") => Theme::Dark,
            _ => Theme::Light,
        })
    }

    pub fn save(self, storage: &dyn Storage) -> Result<(), StorageError> {
        let value = match self {
            Theme::Dark => "true",
            Theme::Light => "false",
        };
        storage.write(THEME_KEY, value)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_match_first_run() {
        let settings = TimerSettings::default();
        assert_eq!(settings.duration_min, 10);
        assert_eq!(settings.interval_chime_min, 0);
        let rain = settings.sounds.get("rain").unwrap();
        assert!(!rain.active);
        assert_eq!(rain.volume, 70);
    }

    #[test]
    fn settings_roundtrip() {
        let storage = MemoryStorage::new();
        let mut settings = TimerSettings {
            duration_min: 25,
            interval_chime_min: 5,
            sounds: BTreeMap::new(),
        };
        settings.sounds.insert(
            "ocean".to_string(),
            SoundSetting {
                active: true,
                volume: 40,
            },
        );

        settings.save(&storage).unwrap();
        assert_eq!(TimerSettings::load(&storage).unwrap(), settings);
    }

    #[test]
    fn load_without_blob_gives_defaults() {
        let storage = MemoryStorage::new();
        assert_eq!(
            TimerSettings::load(&storage).unwrap(),
            TimerSettings::default()
        );
        assert_eq!(Theme::load(&storage).unwrap(), Theme::Light);
    }

    #[test]
    fn corrupt_blob_gives_defaults() {
        let storage = MemoryStorage::new();
        storage.write(SETTINGS_KEY, "{broken").unwrap();
        assert_eq!(
            TimerSettings::load(&storage).unwrap(),
            TimerSettings::default()
        );
    }

    #[test]
    fn theme_roundtrip_and_toggle() {
        let storage = MemoryStorage::new();
        Theme::Dark.save(&storage).unwrap();
        assert_eq!(Theme::load(&storage).unwrap(), Theme::Dark);
        assert_eq!(Theme::load(&storage).unwrap().toggled(), Theme::Light);
    }

    #[test]
    fn active_sounds_filters_toggled_off() {
        let mut settings = TimerSettings::default();
        settings.sounds.insert(
            "forest".to_string(),
            SoundSetting {
                active: true,
                volume: 55,
            },
        );
        let active: Vec<_> = settings.active_sounds().map(|(n, _)| n).collect();
        assert_eq!(active, vec!["forest"]);
    }
}
