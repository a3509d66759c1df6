//! Contract layer - public API for embedding the settings engine
//!
//! This layer contains the setting model, the error type and the native
//! client trait. Nothing in here touches the store or the collaborators.

pub mod client;
pub mod error;
pub mod model;

pub use client::CalculatorSettingsApi;
pub use error::SettingsError;
pub use model::{
    ConfigurationSnapshot, Domain, NiftimalMode, Presentation, SettingKey, SettingValue,
    UnitLabel, UnitTypeEntry,
};
