//! Setting definitions table
//!
//! Declares every recognised setting with its domain and default. The table
//! is ordered like [`SettingKey::ALL`].

use super::validation::{normalize_locale, parse_value};
use crate::contract::{ConfigurationSnapshot, Domain, NiftimalMode, SettingKey, SettingValue};
use std::collections::BTreeMap;

pub const ALLOWED_BASES: &[i64] = &[6, 10];
pub const GROUP_SEPARATORS: &[&str] = &["\u{202f}", " ", "_", ".", ",", "'"];
pub const POINT_SEPARATORS: &[&str] = &[".", ","];
pub const NIFTIMAL_SENTINELS: &[&str] = &["-", "5", "Z"];

/// Prefix marker meaning "no unit prefix"
pub const NO_PREFIX: &str = "-";

/// Locale used when nothing better is known
pub const FALLBACK_LOCALE: &str = "en_us";

/// Static definition of one setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDefinition {
    pub key: SettingKey,
    pub domain: Domain,
    pub default: &'static str,
}

pub const DEFINITIONS: [SettingDefinition; 14] = [
    SettingDefinition {
        key: SettingKey::Base,
        domain: Domain::IntegerSet(ALLOWED_BASES),
        default: "10",
    },
    SettingDefinition {
        key: SettingKey::Locale,
        domain: Domain::Locale,
        default: FALLBACK_LOCALE,
    },
    SettingDefinition {
        key: SettingKey::Spellout,
        domain: Domain::Boolean,
        default: "true",
    },
    SettingDefinition {
        key: SettingKey::SezimalDigits,
        domain: Domain::Boolean,
        default: "false",
    },
    SettingDefinition {
        key: SettingKey::Grouping,
        domain: Domain::Integer { min: 1, max: 6 },
        default: "3",
    },
    SettingDefinition {
        key: SettingKey::GroupSeparator,
        domain: Domain::Choice(GROUP_SEPARATORS),
        default: "\u{202f}",
    },
    SettingDefinition {
        key: SettingKey::PointSeparator,
        domain: Domain::Choice(POINT_SEPARATORS),
        default: ".",
    },
    SettingDefinition {
        key: SettingKey::Niftimal,
        domain: Domain::Choice(NIFTIMAL_SENTINELS),
        default: "-",
    },
    SettingDefinition {
        key: SettingKey::SezimalPlaces,
        domain: Domain::Integer { min: 0, max: 30 },
        default: "3",
    },
    SettingDefinition {
        key: SettingKey::UnitType,
        domain: Domain::UnitType,
        default: "units",
    },
    SettingDefinition {
        key: SettingKey::SezimalUnit,
        domain: Domain::Text,
        default: "",
    },
    SettingDefinition {
        key: SettingKey::DecimalUnit,
        domain: Domain::Text,
        default: "",
    },
    SettingDefinition {
        key: SettingKey::SezimalPrefix,
        domain: Domain::Text,
        default: NO_PREFIX,
    },
    SettingDefinition {
        key: SettingKey::DecimalPrefix,
        domain: Domain::Text,
        default: NO_PREFIX,
    },
];

/// Static definition for `key`
pub fn definition(key: SettingKey) -> &'static SettingDefinition {
    &DEFINITIONS[key as usize]
}

/// Declared domain of `key`
pub fn domain_of(key: SettingKey) -> Domain {
    definition(key).domain
}

/// Definitions with the host-dependent locale default resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDefinitions {
    locale: String,
}

impl SettingDefinitions {
    /// `default_locale` is normalised; an unusable tag falls back to `en_us`
    pub fn new(default_locale: &str) -> Self {
        let locale =
            normalize_locale(default_locale).unwrap_or_else(|| FALLBACK_LOCALE.to_string());
        Self { locale }
    }

    /// Default of `key` in stored form
    pub fn default_of(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Locale => self.locale.clone(),
            _ => definition(key).default.to_string(),
        }
    }

    /// Default of `key` as a typed value
    pub fn default_value(&self, key: SettingKey) -> SettingValue {
        let raw = self.default_of(key);
        parse_value(domain_of(key), &raw).unwrap_or(SettingValue::Text(raw))
    }

    /// Every key mapped to its stored default
    pub fn defaults(&self) -> BTreeMap<SettingKey, String> {
        SettingKey::ALL
            .into_iter()
            .map(|key| (key, self.default_of(key)))
            .collect()
    }

    /// Snapshot holding every default
    pub fn snapshot(&self) -> ConfigurationSnapshot {
        ConfigurationSnapshot {
            base: 10,
            locale: self.locale.clone(),
            spellout: true,
            sezimal_digits: false,
            grouping: 3,
            group_separator: '\u{202f}',
            point_separator: '.',
            niftimal: NiftimalMode::Disabled,
            sezimal_places: 3,
            unit_type: "units".to_string(),
            sezimal_unit: String::new(),
            decimal_unit: String::new(),
            sezimal_prefix: NO_PREFIX.to_string(),
            decimal_prefix: NO_PREFIX.to_string(),
        }
    }
}

impl Default for SettingDefinitions {
    fn default() -> Self {
        Self::new(FALLBACK_LOCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_follows_key_order() {
        for (definition, key) in DEFINITIONS.iter().zip(SettingKey::ALL) {
            assert_eq!(definition.key, key);
        }
    }

    #[test]
    fn test_every_default_is_in_its_domain() {
        let definitions = SettingDefinitions::default();
        for key in SettingKey::ALL {
            let raw = definitions.default_of(key);
            assert!(
                parse_value(domain_of(key), &raw).is_some(),
                "default '{}' of {} is outside its domain",
                raw,
                key
            );
        }
    }

    #[test]
    fn test_default_snapshot_matches_table() {
        let definitions = SettingDefinitions::new("pt-BR");
        let snapshot = definitions.snapshot();
        for key in SettingKey::ALL {
            assert_eq!(snapshot.value_of(key), definitions.default_value(key), "{}", key);
        }
    }

    #[test]
    fn test_locale_default_is_normalized() {
        assert_eq!(SettingDefinitions::new("pt-BR").default_of(SettingKey::Locale), "pt_br");
        assert_eq!(SettingDefinitions::new("").default_of(SettingKey::Locale), "en_us");
    }

    #[test]
    fn test_defaults_cover_every_key() {
        let defaults = SettingDefinitions::default().defaults();
        assert_eq!(defaults.len(), SettingKey::ALL.len());
        assert_eq!(defaults[&SettingKey::Niftimal], "-");
        assert_eq!(defaults[&SettingKey::UnitType], "units");
        assert_eq!(defaults[&SettingKey::Base], "10");
    }
}
