//! Durable appointment cache.
//!
//! The cache only exists so the UI has something to show before the first
//! poll lands. It is written after every poll attempt and read exactly once
//! at startup. Every failure here is logged and swallowed: a missing or
//! corrupt snapshot just means a cold start.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::appointment::Appointment;
use crate::constants::CACHE_KEY;

/// Save/restore capability for the last known appointment list.
pub trait DurableCache: Send + Sync {
    /// The last persisted snapshot, or `None` if absent or unreadable.
    fn load(&self) -> Option<Vec<Appointment>>;

    /// Overwrite the snapshot. Best-effort: never fails the caller.
    fn save(&self, appointments: &[Appointment]);
}

/// Minimal string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// `DurableCache` that keeps the JSON-serialized list under a fixed key.
pub struct KvCache<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvCache<S> {
    pub fn new(store: S) -> Self {
        KvCache {
            store,
            key: CACHE_KEY.to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> DurableCache for KvCache<S> {
    fn load(&self) -> Option<Vec<Appointment>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not read cached appointments");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(list) => Some(list),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring malformed appointment cache");
                None
            }
        }
    }

    fn save(&self, appointments: &[Appointment]) {
        let json = match serde_json::to_string(appointments) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Could not serialize appointments for cache");
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &json) {
            tracing::warn!(key = %self.key, error = %e, "Could not persist appointment cache");
        } else {
            tracing::trace!(key = %self.key, count = appointments.len(), "Appointment cache saved");
        }
    }
}

/// One file per key inside a directory.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirStore { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-memory store, mostly for tests.
///
/// An optional quota (in bytes, per value) makes `set` fail the way a full
/// disk would.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(bytes: usize) -> Self {
        MemoryStore {
            entries: Mutex::default(),
            quota: Some(bytes),
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(io::Error::new(
                    io::ErrorKind::StorageFull,
                    format!("value of {} bytes exceeds quota of {quota}", value.len()),
                ));
            }
        }
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
