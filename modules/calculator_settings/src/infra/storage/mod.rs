//! Storage layer - settings store backends

pub mod file;
pub mod memory;

pub use file::{FileSettingsStore, FileStoreError};
pub use memory::InMemorySettingsStore;
