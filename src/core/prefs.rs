//! # Preferences
//!
//! The two values that survive restarts: theme and language. Stored as a
//! small JSON file at `~/.folio/prefs.json`:
//!
//! ```json
//! { "values": { "theme": "dark", "lang": "en" }, "updated_at": 1760000000 }
//! ```
//!
//! Writes go through `.tmp` + `rename()`. A missing or unreadable file is
//! treated as empty; nothing here is worth refusing to start over.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const THEME_KEY: &str = "theme";
pub const LANG_KEY: &str = "lang";

/// Key-value storage for user preferences.
pub trait PrefStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

#[derive(Serialize, Deserialize, Default, Debug)]
struct PrefFile {
    #[serde(default)]
    values: BTreeMap<String, String>,
    #[serde(default)]
    updated_at: Option<i64>,
}

/// Preferences backed by a JSON file.
pub struct FilePrefs {
    path: PathBuf,
    data: PrefFile,
}

impl FilePrefs {
    /// Returns `~/.folio/prefs.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".folio").join("prefs.json"))
    }

    pub fn open(path: PathBuf) -> Self {
        let data = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<PrefFile>(&contents) {
                Ok(data) => {
                    debug!("Loaded {} preferences from {}", data.values.len(), path.display());
                    data
                }
                Err(e) => {
                    warn!("Ignoring malformed preferences file {}: {}", path.display(), e);
                    PrefFile::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => PrefFile::default(),
            Err(e) => {
                warn!("Failed to read preferences {}: {}", path.display(), e);
                PrefFile::default()
            }
        };
        Self { path, data }
    }
}

impl PrefStore for FilePrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.data.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.data.values.insert(key.to_string(), value.to_string());
        self.data.updated_at = Some(Utc::now().timestamp());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, &self.data)
    }
}

/// Preferences that live only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefs {
    values: BTreeMap<String, String>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PrefStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePrefs::open(dir.path().join("prefs.json"));
        assert_eq!(prefs.get(THEME_KEY), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut prefs = FilePrefs::open(path.clone());
        prefs.set(THEME_KEY, "dark").unwrap();
        prefs.set(LANG_KEY, "en").unwrap();

        let reopened = FilePrefs::open(path.clone());
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(reopened.get(LANG_KEY).as_deref(), Some("en"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        let prefs = FilePrefs::open(path);
        assert_eq!(prefs.get(LANG_KEY), None);
    }

    #[test]
    fn memory_prefs_round_trip() {
        let mut prefs = MemoryPrefs::new().with(LANG_KEY, "en");
        assert_eq!(prefs.get(LANG_KEY).as_deref(), Some("en"));
        prefs.set(THEME_KEY, "light").unwrap();
        assert_eq!(prefs.get(THEME_KEY).as_deref(), Some("light"));
    }
}
