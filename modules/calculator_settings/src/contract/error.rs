//! Contract error types for the calculator settings engine
//!
//! None of these are fatal: invalid input is rejected at the boundary and
//! corrupt stored data is replaced by the setting's default.

/// Settings engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Value outside the setting's declared domain; prior state is kept
    InvalidConfigurationValue {
        /// Persisted key of the setting
        key: String,
        /// Rejected value, as it would have been stored
        value: String,
        /// Why the value was rejected
        reason: String,
    },
    /// Unit code not present in the unit mapping table
    UnknownUnitType {
        /// Rejected unit code
        code: String,
    },
    /// Stored value does not parse into the setting's domain
    CorruptStoredValue {
        /// Persisted key of the setting
        key: String,
        /// Raw stored value
        value: String,
    },
    /// Operation attempted before bootstrap
    NotInitialized,
    /// Durable store failure
    Storage {
        /// Store error details
        message: String,
    },
}

impl SettingsError {
    pub(crate) fn invalid(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfigurationValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn storage(error: anyhow::Error) -> Self {
        Self::Storage {
            message: format!("{:#}", error),
        }
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfigurationValue { key, value, reason } => {
                write!(f, "Invalid value '{}' for {}: {}", value, key, reason)
            }
            Self::UnknownUnitType { code } => {
                write!(f, "Unknown unit type: {}", code)
            }
            Self::CorruptStoredValue { key, value } => {
                write!(f, "Corrupt stored value for {}: '{}'", key, value)
            }
            Self::NotInitialized => {
                write!(f, "Settings not bootstrapped")
            }
            Self::Storage { message } => {
                write!(f, "Settings store error: {}", message)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
