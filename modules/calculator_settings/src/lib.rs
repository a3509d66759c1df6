//! Calculator Settings Module
//!
//! Persisted configuration engine for the sezimal calculator.
//! Every setting change is validated against its declared domain, written to
//! the durable store together with the settings derived from it, and followed
//! by a single recomputation signal to the display collaborators.

// Public exports
pub mod contract;
pub use contract::{
    client::CalculatorSettingsApi, error::SettingsError, ConfigurationSnapshot, Domain,
    NiftimalMode, Presentation, SettingKey, SettingValue, UnitLabel, UnitTypeEntry,
};

pub mod module;
pub use module::CalculatorSettingsModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
