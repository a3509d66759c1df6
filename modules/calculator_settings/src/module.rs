//! Module declaration and wiring
//!
//! Builds the store selected by [`Config`], the domain service and the
//! native client, then bootstraps the settings.

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::CalculatorSettingsApi;
use crate::domain::{DisplayPublisher, Service, SettingDefinitions, SettingsStore};
use crate::infra::storage::{FileSettingsStore, InMemorySettingsStore};
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Calculator settings module
pub struct CalculatorSettingsModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for CalculatorSettingsModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl CalculatorSettingsModule {
    /// Wire the store and service from `config`, then bootstrap
    pub fn init(&self, config: Config, publisher: Arc<dyn DisplayPublisher>) -> Result<()> {
        let store: Arc<dyn SettingsStore> = match &config.store_path {
            Some(path) => Arc::new(FileSettingsStore::open(path)?),
            None => Arc::new(InMemorySettingsStore::new()),
        };
        let definitions = SettingDefinitions::new(&config.seed_locale());

        let service = Arc::new(Service::new(store, publisher, definitions));
        service.bootstrap()?;

        tracing::info!(
            persistent = config.store_path.is_some(),
            "Calculator settings module initialized"
        );

        *self.config.write() = config;
        *self.service.write() = Some(service);
        Ok(())
    }

    /// Client for the calculator shell
    pub fn client(&self) -> Result<Arc<dyn CalculatorSettingsApi>> {
        let service = self
            .service
            .read()
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?
            .clone();
        Ok(Arc::new(NativeClient::new(service)))
    }

    /// Configuration the module was initialised with
    pub fn config(&self) -> Config {
        self.config.read().clone()
    }
}
