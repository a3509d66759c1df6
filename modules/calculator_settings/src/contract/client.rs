//! Native client trait for embedding hosts
//!
//! This trait defines the API that the calculator shell uses to drive the
//! settings engine. Direct function calls, no transport.

use super::{
    error::SettingsError,
    model::{
        ConfigurationSnapshot, NiftimalMode, Presentation, SettingKey, SettingValue,
        UnitTypeEntry,
    },
};

/// Calculator settings API
pub trait CalculatorSettingsApi: Send + Sync {
    // ===== Lifecycle =====

    /// Seed missing settings and re-apply everything once
    fn bootstrap(&self) -> Result<ConfigurationSnapshot, SettingsError>;

    // ===== Numeral display =====

    /// Select the numeral base (6 or 10)
    fn set_base(&self, base: u8) -> Result<(), SettingsError>;

    /// Select the locale; stored lowercase with `_` as region separator
    fn set_locale(&self, locale: &str) -> Result<(), SettingsError>;

    /// Toggle spelled-out numbers
    fn set_spellout(&self, enabled: bool) -> Result<(), SettingsError>;

    /// Toggle dedicated sezimal digit glyphs
    fn set_sezimal_digits(&self, enabled: bool) -> Result<(), SettingsError>;

    /// Set the digit grouping size
    fn set_grouping(&self, size: u8) -> Result<(), SettingsError>;

    /// Set the digit group separator
    fn set_group_separator(&self, separator: char) -> Result<(), SettingsError>;

    /// Set the sezimal point separator
    fn set_point_separator(&self, separator: char) -> Result<(), SettingsError>;

    /// Set the number of sezimal places shown
    fn set_sezimal_places(&self, places: u8) -> Result<(), SettingsError>;

    /// Advance the niftimal mode one step along its cycle
    fn cycle_niftimal(&self) -> Result<NiftimalMode, SettingsError>;

    // ===== Units =====

    /// Select a unit type and reset its four dependent settings
    fn select_unit_type(&self, code: &str) -> Result<&'static UnitTypeEntry, SettingsError>;

    /// Choose another sezimal unit within the current unit type
    fn set_sezimal_unit(&self, symbol: &str) -> Result<(), SettingsError>;

    /// Choose another decimal unit within the current unit type
    fn set_decimal_unit(&self, symbol: &str) -> Result<(), SettingsError>;

    // ===== Reads =====

    /// Current in-memory configuration
    fn snapshot(&self) -> Result<ConfigurationSnapshot, SettingsError>;

    /// Labels derived from the current configuration
    fn presentation(&self) -> Result<Presentation, SettingsError>;

    /// Fresh, validated read of one key from the durable store
    fn read_setting(&self, key: SettingKey) -> Result<SettingValue, SettingsError>;
}
