//! Change notifications for display collaborators
//!
//! After every accepted mutation the service hands one `SettingsChanged` to
//! the label-refresh side and then fires the zero-argument recomputation
//! signal. Both calls are synchronous and fire-and-forget.

use crate::contract::{Presentation, SettingKey};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Settings that changed together, with the labels derived afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsChanged {
    /// Keys written by the operation
    pub keys: Vec<SettingKey>,
    /// Labels derived from the new configuration
    pub presentation: Presentation,
    /// Time of the change
    pub timestamp: DateTime<Utc>,
}

impl SettingsChanged {
    pub fn new(keys: Vec<SettingKey>, presentation: Presentation) -> Self {
        Self {
            keys,
            presentation,
            timestamp: Utc::now(),
        }
    }
}

/// Display collaborator interface
///
/// Called after the service lock is released, so implementations may read
/// settings back through the service.
pub trait DisplayPublisher: Send + Sync {
    /// Refresh every label that depends on settings
    fn refresh_labels(&self, change: &SettingsChanged);

    /// Re-run the numeral calculation and re-render the output
    fn recompute_display(&self);
}

/// No-op publisher for hosts without a display
pub struct NoOpDisplayPublisher;

impl DisplayPublisher for NoOpDisplayPublisher {
    fn refresh_labels(&self, _change: &SettingsChanged) {}

    fn recompute_display(&self) {}
}
