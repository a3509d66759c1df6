//! Native client implementation - wraps the domain service for in-process calls

use crate::contract::{
    CalculatorSettingsApi, ConfigurationSnapshot, NiftimalMode, Presentation, SettingKey,
    SettingValue, SettingsError, UnitTypeEntry,
};
use crate::domain::Service;
use std::sync::Arc;

/// Native client that calls the domain service directly
///
/// Handed out by the module so the calculator shell depends on the
/// contract trait only.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl CalculatorSettingsApi for NativeClient {
    fn bootstrap(&self) -> Result<ConfigurationSnapshot, SettingsError> {
        self.service.bootstrap()
    }

    fn set_base(&self, base: u8) -> Result<(), SettingsError> {
        self.service.set_base(base)
    }

    fn set_locale(&self, locale: &str) -> Result<(), SettingsError> {
        self.service.set_locale(locale)
    }

    fn set_spellout(&self, enabled: bool) -> Result<(), SettingsError> {
        self.service.set_spellout(enabled)
    }

    fn set_sezimal_digits(&self, enabled: bool) -> Result<(), SettingsError> {
        self.service.set_sezimal_digits(enabled)
    }

    fn set_grouping(&self, size: u8) -> Result<(), SettingsError> {
        self.service.set_grouping(size)
    }

    fn set_group_separator(&self, separator: char) -> Result<(), SettingsError> {
        self.service.set_group_separator(separator)
    }

    fn set_point_separator(&self, separator: char) -> Result<(), SettingsError> {
        self.service.set_point_separator(separator)
    }

    fn set_sezimal_places(&self, places: u8) -> Result<(), SettingsError> {
        self.service.set_sezimal_places(places)
    }

    fn cycle_niftimal(&self) -> Result<NiftimalMode, SettingsError> {
        self.service.cycle_niftimal()
    }

    fn select_unit_type(&self, code: &str) -> Result<&'static UnitTypeEntry, SettingsError> {
        self.service.select_unit_type(code)
    }

    fn set_sezimal_unit(&self, symbol: &str) -> Result<(), SettingsError> {
        self.service.set_sezimal_unit(symbol)
    }

    fn set_decimal_unit(&self, symbol: &str) -> Result<(), SettingsError> {
        self.service.set_decimal_unit(symbol)
    }

    fn snapshot(&self) -> Result<ConfigurationSnapshot, SettingsError> {
        self.service.snapshot()
    }

    fn presentation(&self) -> Result<Presentation, SettingsError> {
        self.service.presentation()
    }

    fn read_setting(&self, key: SettingKey) -> Result<SettingValue, SettingsError> {
        self.service.read_setting(key)
    }
}
