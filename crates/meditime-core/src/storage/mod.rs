//! Persistence boundary.
//!
//! The core treats storage as synchronous durable key-value blobs with
//! whole-object read/replace semantics: read the entire structure,
//! mutate in memory, write the entire structure back. Only one UI thread
//! touches it, so no concurrent-writer support is needed.
//!
//! [`SqliteStorage`] keeps the blobs in a kv table inside
//! `~/.config/meditime/meditime.db`; [`MemoryStorage`] backs degraded
//! sessions and tests.

mod config;
pub mod history;
pub mod settings;

pub use config::{Config, NotificationsConfig, SoundConfig, TimerConfig};

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StorageError;

/// Blob key for the per-day session history.
pub const HISTORY_KEY: &str = "meditation-history";
/// Blob key for the last-used timer settings.
pub const SETTINGS_KEY: &str = "timer-settings";
/// Blob key for the theme preference.
pub const THEME_KEY: &str = "dark-theme";

/// Returns `~/.config/meditime[-dev]/` based on MEDITIME_ENV.
///
/// Set MEDITIME_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MEDITIME_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("meditime-dev")
    } else {
        base_dir.join("meditime")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Durable key-value blob storage.
pub trait Storage {
    /// Read the blob stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the blob stored under `key`. Removing an absent key is not
    /// an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reset history, settings, and theme preference to empty/default.
pub fn clear_all(storage: &dyn Storage) -> Result<(), StorageError> {
    storage.remove(HISTORY_KEY)?;
    storage.remove(SETTINGS_KEY)?;
    storage.remove(THEME_KEY)?;
    Ok(())
}

/// SQLite-backed blob storage.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open the database at `~/.config/meditime/meditime.db`, creating
    /// the file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(data_dir()?.join("meditime.db"))
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: impl AsRef<std::path::Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    /// Open an in-memory database (for tests and throwaway sessions).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-process storage. Holds blobs for the lifetime of the value only;
/// used as the degraded-mode fallback when the database cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_kv_roundtrip() {
        let storage = SqliteStorage::open_memory().unwrap();
        assert_eq!(storage.read("missing").unwrap(), None);

        storage.write("k", "v1").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v1"));

        storage.write("k", "v2").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v2"));

        storage.remove("k").unwrap();
        assert_eq!(storage.read("k").unwrap(), None);
    }

    #[test]
    fn sqlite_blobs_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meditime.db");

        let storage = SqliteStorage::open_at(&path).unwrap();
        storage.write(SETTINGS_KEY, "{\"duration_min\":25}").unwrap();
        drop(storage);

        let storage = SqliteStorage::open_at(&path).unwrap();
        assert_eq!(
            storage.read(SETTINGS_KEY).unwrap().as_deref(),
            Some("{\"duration_min\":25}")
        );
    }

    #[test]
    fn remove_absent_key_is_ok() {
        let storage = MemoryStorage::new();
        storage.remove("never-written").unwrap();
    }

    #[test]
    fn clear_all_removes_every_app_key() {
        let storage = MemoryStorage::new();
        storage.write(HISTORY_KEY, "{}").unwrap();
        storage.write(SETTINGS_KEY, "{}").unwrap();
        storage.write(THEME_KEY, "true").unwrap();

        clear_all(&storage).unwrap();

        assert_eq!(storage.read(HISTORY_KEY).unwrap(), None);
        assert_eq!(storage.read(SETTINGS_KEY).unwrap(), None);
        assert_eq!(storage.read(THEME_KEY).unwrap(), None);
    }
}
