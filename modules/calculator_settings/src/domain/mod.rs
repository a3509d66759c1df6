//! Domain layer - settings semantics and synchronization

pub mod bootstrap;
pub mod definitions;
pub mod events;
pub mod niftimal;
pub mod presentation;
pub mod repository;
pub mod service;
pub mod units;
pub mod validation;

pub use crate::contract::{Presentation, UnitLabel};
pub use definitions::SettingDefinitions;
pub use events::{DisplayPublisher, NoOpDisplayPublisher, SettingsChanged};
pub use repository::SettingsStore;
pub use service::Service;
