//! JSON file settings store
//!
//! The whole store is one flat JSON object of string keys to string values.
//! Each write rewrites the file through a temporary sibling and a rename, so
//! a multi-key write lands on disk as a unit.

use crate::domain::repository::SettingsStore;
use anyhow::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File store errors
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("Cannot access settings file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file {} is not a JSON object of strings: {}", .path.display(), .source)]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings persisted to a JSON file
pub struct FileSettingsStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl FileSettingsStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FileStoreError> {
        let path = path.into();
        let data: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| FileStoreError::Malformed {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(FileStoreError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = data.len(), "Opened settings file");
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn flush(&self, data: &BTreeMap<String, String>) -> Result<(), FileStoreError> {
        let io = |source: std::io::Error| FileStoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io)?;
        }

        let contents = serde_json::to_string_pretty(data).map_err(|source| {
            FileStoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(io)?;
        fs::rename(&tmp, &self.path).map_err(io)?;
        Ok(())
    }

    fn write_entries<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<()> {
        let mut data = self.data.write();
        let mut next = data.clone();
        for (key, value) in entries {
            next.insert(key.to_string(), value.to_string());
        }
        // memory only changes once the file is written
        self.flush(&next)?;
        *data = next;
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write_entries([(key, value)])
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        self.write_entries(entries.iter().map(|(k, v)| (*k, v.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileSettingsStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.get("sezimal-calculator-base").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let store = FileSettingsStore::open(&path).unwrap();
        store
            .set_many(&[
                ("sezimal-calculator-unit-type", "pad".to_string()),
                ("sezimal-calculator-unit", "Dpad".to_string()),
            ])
            .unwrap();
        store.set("sezimal-calculator-base", "6").unwrap();
        drop(store);

        let reopened = FileSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get("sezimal-calculator-unit-type").unwrap().as_deref(), Some("pad"));
        assert_eq!(reopened.get("sezimal-calculator-unit").unwrap().as_deref(), Some("Dpad"));
        assert_eq!(reopened.get("sezimal-calculator-base").unwrap().as_deref(), Some("6"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = FileSettingsStore::open(&path);
        assert!(matches!(result, Err(FileStoreError::Malformed { .. })));
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "").unwrap();

        let store = FileSettingsStore::open(&path).unwrap();
        assert!(!store.has("sezimal-calculator-locale").unwrap());
    }
}
