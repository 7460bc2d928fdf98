use meditime_core::{MemoryStorage, SqliteStorage, Storage};

/// Open durable storage, degrading to in-memory state when the database
/// cannot be opened. The timer must keep working without persistence.
pub fn open_storage() -> Box<dyn Storage> {
    match SqliteStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            eprintln!("warning: storage unavailable ({e}); this session will not be saved");
            Box::new(MemoryStorage::new())
        }
    }
}
