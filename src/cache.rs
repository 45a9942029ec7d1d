//! Client-side mirror cache.
//!
//! The stores keep a local copy of the server collections in two fixed,
//! independent slots under a cache directory:
//!
//! ```text
//! <cache dir>/
//!   tasks.json       # serialized task collection
//!   user.json        # serialized profile record
//! ```
//!
//! No versioning, expiry, or migration exists. A missing or unreadable slot
//! reads as absent; unreadable slots are logged and fall back to the server
//! on the next refresh. Slots are rewritten in full after every successful
//! server round trip, atomically (temp file + rename) so a reader never
//! sees a partial write.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Slot name for the task collection.
pub const TASKS_SLOT: &str = "tasks";

/// Slot name for the profile record.
pub const USER_SLOT: &str = "user";

/// File-backed key/value cache with fixed slot names.
#[derive(Debug, Clone)]
pub struct MirrorCache {
    dir: PathBuf,
}

impl MirrorCache {
    /// Create a cache rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Resolve the platform cache directory for taskdeck.
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "taskdeck")
            .map(|dirs| dirs.cache_dir().to_path_buf())
    }

    /// Path of a named slot.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    /// Read a slot, returning `None` when it is missing or unreadable.
    /// Corrupt contents are treated as absent so the caller falls back to
    /// the server instead of failing the refresh.
    pub fn read<T: DeserializeOwned>(&self, slot: &str) -> Option<T> {
        let path = self.slot_path(slot);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(slot, error = %err, "failed to read cache slot");
                }
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(slot, error = %err, "discarding unreadable cache slot");
                None
            }
        }
    }

    /// Rewrite a slot in full.
    pub fn write<T: Serialize>(&self, slot: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        write_atomic(&self.slot_path(slot), json.as_bytes())
    }

    /// Remove a slot. Missing slots are not an error.
    pub fn clear(&self, slot: &str) -> Result<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Write data atomically using temp file + rename, so readers never see a
/// partial slot.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_slot_reads_as_absent() {
        let dir = tempdir().expect("tempdir");
        let cache = MirrorCache::new(dir.path().to_path_buf());
        assert!(cache.read::<Vec<String>>(TASKS_SLOT).is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().expect("tempdir");
        let cache = MirrorCache::new(dir.path().to_path_buf());
        let value = vec!["a".to_string(), "b".to_string()];
        cache.write(TASKS_SLOT, &value).expect("write");
        assert_eq!(cache.read::<Vec<String>>(TASKS_SLOT), Some(value));
    }

    #[test]
    fn corrupt_slot_reads_as_absent() {
        let dir = tempdir().expect("tempdir");
        let cache = MirrorCache::new(dir.path().to_path_buf());
        fs::create_dir_all(dir.path()).expect("mkdir");
        fs::write(cache.slot_path(USER_SLOT), "{not json").expect("write");
        assert!(cache.read::<Vec<String>>(USER_SLOT).is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempdir().expect("tempdir");
        let cache = MirrorCache::new(dir.path().to_path_buf());
        cache.write(USER_SLOT, &"x").expect("write");
        cache.clear(USER_SLOT).expect("clear");
        cache.clear(USER_SLOT).expect("clear again");
        assert!(cache.read::<String>(USER_SLOT).is_none());
    }

    #[test]
    fn slots_are_independent() {
        let dir = tempdir().expect("tempdir");
        let cache = MirrorCache::new(dir.path().to_path_buf());
        cache.write(TASKS_SLOT, &vec![1, 2, 3]).expect("write tasks");
        cache.clear(USER_SLOT).expect("clear user");
        assert_eq!(cache.read::<Vec<i32>>(TASKS_SLOT), Some(vec![1, 2, 3]));
    }
}
