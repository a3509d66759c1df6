//! Durable settings store trait
//!
//! Implementations are in infra/storage. Values are plain strings; the
//! service validates everything it reads back.

use anyhow::Result;

/// Key/value store surviving across sessions
pub trait SettingsStore: Send + Sync {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Whether anything is stored under `key`
    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Store several entries as one unit where the backend allows it
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}
