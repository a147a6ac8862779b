//! Cookie-style key-value string storage with per-key expiry.
//!
//! Everything the app persists goes through [`KeyValueStore`]. A value is a
//! plain string; each write stamps the entry with an expiry, and expired
//! entries read back as absent.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifetime applied to every write made by the app.
pub fn default_ttl() -> Duration {
    Duration::days(365)
}

pub trait KeyValueStore {
    /// Returns the live value under `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, expiring `ttl` from now.
    fn set(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Utc::now() + ttl,
        }
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// In-process jar, used by tests and by callers that want no disk state.
#[derive(Debug, Default)]
pub struct MemoryJar {
    entries: HashMap<String, Entry>,
}

impl MemoryJar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryJar {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Utc::now();
        Ok(self
            .entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries.insert(key.to_string(), Entry::new(value, ttl));
        Ok(())
    }
}

/// Jar persisted as one JSON object (`key -> {value, expires_at}`) on disk.
///
/// The file is read on every `get` and rewritten in full on every `set`, so
/// two processes sharing a file resolve conflicts by last write.
#[derive(Debug, Clone)]
pub struct FileJar {
    path: PathBuf,
}

impl FileJar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, Entry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(Error::file(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "unreadable jar file, starting empty: {e}");
                Ok(BTreeMap::new())
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, Entry>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).map_err(|e| Error::file(&self.path, e))
    }
}

impl KeyValueStore for FileJar {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Utc::now();
        Ok(self
            .load()?
            .remove(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value))
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let now = Utc::now();
        let mut entries = self.load()?;
        entries.retain(|_, e| e.is_live(now));
        entries.insert(key.to_string(), Entry::new(value, ttl));
        tracing::debug!(key, path = %self.path.display(), "jar write");
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_jar_returns_what_was_set() {
        let mut jar = MemoryJar::new();
        assert_eq!(jar.get("tasks").unwrap(), None);
        jar.set("tasks", "[]", default_ttl()).unwrap();
        assert_eq!(jar.get("tasks").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn expired_entry_reads_as_absent() {
        let mut jar = MemoryJar::new();
        jar.set("theme", "dark", Duration::seconds(-1)).unwrap();
        assert_eq!(jar.get("theme").unwrap(), None);
    }

    #[test]
    fn file_jar_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cookies.json");

        let mut jar = FileJar::new(&path);
        jar.set("tasks", "[1]", default_ttl()).unwrap();
        jar.set("theme", "light", default_ttl()).unwrap();

        let reopened = FileJar::new(&path);
        assert_eq!(reopened.get("tasks").unwrap().as_deref(), Some("[1]"));
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn file_jar_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let jar = FileJar::new(dir.path().join("absent.json"));
        assert_eq!(jar.get("tasks").unwrap(), None);
    }

    #[test]
    fn file_jar_garbage_is_empty_and_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "not json at all").unwrap();

        let mut jar = FileJar::new(&path);
        assert_eq!(jar.get("tasks").unwrap(), None);
        jar.set("tasks", "[]", default_ttl()).unwrap();
        assert_eq!(jar.get("tasks").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_jar_prunes_expired_entries_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let mut jar = FileJar::new(&path);
        jar.set("stale", "x", Duration::seconds(-1)).unwrap();
        jar.set("tasks", "[]", default_ttl()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("stale"));
        assert!(raw.contains("expires_at"));
    }
}
