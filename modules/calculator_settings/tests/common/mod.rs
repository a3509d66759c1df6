//! Common test utilities: mock store, recording publisher, service builder

#![allow(dead_code, clippy::unwrap_used)]

use calculator_settings::domain::{
    DisplayPublisher, Service, SettingDefinitions, SettingsChanged, SettingsStore,
};
use calculator_settings::SettingKey;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Store backed by a map, with switchable write failures and a write log
#[derive(Default)]
pub struct MockStore {
    data: RwLock<HashMap<String, String>>,
    fail_writes: RwLock<bool>,
    write_calls: RwLock<usize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(SettingKey, &str)]) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.put(*key, value);
        }
        store
    }

    /// Write directly, bypassing the service
    pub fn put(&self, key: SettingKey, value: &str) {
        self.data
            .write()
            .insert(key.as_str().to_string(), value.to_string());
    }

    pub fn raw(&self, key: SettingKey) -> Option<String> {
        self.data.read().get(key.as_str()).cloned()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.write() = fail;
    }

    /// Number of `set`/`set_many` calls that reached the store
    pub fn write_calls(&self) -> usize {
        *self.write_calls.read()
    }

    pub fn dump(&self) -> HashMap<String, String> {
        self.data.read().clone()
    }
}

impl SettingsStore for MockStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.set_many(&[(key, value.to_string())])
    }

    fn set_many(&self, entries: &[(&str, String)]) -> anyhow::Result<()> {
        *self.write_calls.write() += 1;
        if *self.fail_writes.read() {
            anyhow::bail!("disk full");
        }
        let mut data = self.data.write();
        for (key, value) in entries {
            data.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}

/// Publisher that records everything it is handed
#[derive(Default)]
pub struct RecordingPublisher {
    changes: RwLock<Vec<SettingsChanged>>,
    recomputes: RwLock<usize>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> Vec<SettingsChanged> {
        self.changes.read().clone()
    }

    pub fn last_change(&self) -> Option<SettingsChanged> {
        self.changes.read().last().cloned()
    }

    pub fn recomputes(&self) -> usize {
        *self.recomputes.read()
    }
}

impl DisplayPublisher for RecordingPublisher {
    fn refresh_labels(&self, change: &SettingsChanged) {
        self.changes.write().push(change.clone());
    }

    fn recompute_display(&self) {
        *self.recomputes.write() += 1;
    }
}

pub struct Harness {
    pub store: Arc<MockStore>,
    pub publisher: Arc<RecordingPublisher>,
    pub service: Service,
}

/// Service over `store` with an `en_us` locale default, not yet bootstrapped
pub fn harness_with(store: MockStore) -> Harness {
    let store = Arc::new(store);
    let publisher = Arc::new(RecordingPublisher::new());
    let service = Service::new(
        store.clone() as Arc<dyn SettingsStore>,
        publisher.clone() as Arc<dyn DisplayPublisher>,
        SettingDefinitions::new("en_us"),
    );
    Harness {
        store,
        publisher,
        service,
    }
}

/// Bootstrapped service over an empty store
pub fn bootstrapped() -> Harness {
    let harness = harness_with(MockStore::new());
    harness.service.bootstrap().unwrap();
    harness
}

/// Stored value of each of the five unit-related keys
pub fn unit_settings(store: &MockStore) -> [Option<String>; 5] {
    [
        store.raw(SettingKey::UnitType),
        store.raw(SettingKey::SezimalUnit),
        store.raw(SettingKey::DecimalUnit),
        store.raw(SettingKey::SezimalPrefix),
        store.raw(SettingKey::DecimalPrefix),
    ]
}
