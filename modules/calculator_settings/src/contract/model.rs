//! Contract models for the calculator settings engine
//!
//! These models are independent of the store and of the display layer.
//! Only the small identifier types carry serde derives, so they can appear
//! in change events.

use super::error::SettingsError;
use serde::{Serialize, Serializer};

/// Every recognised setting, in persisted layout order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    Base,
    Locale,
    Spellout,
    SezimalDigits,
    Grouping,
    GroupSeparator,
    PointSeparator,
    Niftimal,
    SezimalPlaces,
    UnitType,
    SezimalUnit,
    DecimalUnit,
    SezimalPrefix,
    DecimalPrefix,
}

impl SettingKey {
    pub const ALL: [SettingKey; 14] = [
        SettingKey::Base,
        SettingKey::Locale,
        SettingKey::Spellout,
        SettingKey::SezimalDigits,
        SettingKey::Grouping,
        SettingKey::GroupSeparator,
        SettingKey::PointSeparator,
        SettingKey::Niftimal,
        SettingKey::SezimalPlaces,
        SettingKey::UnitType,
        SettingKey::SezimalUnit,
        SettingKey::DecimalUnit,
        SettingKey::SezimalPrefix,
        SettingKey::DecimalPrefix,
    ];

    /// Key under which the setting lives in the durable store
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Base => "sezimal-calculator-base",
            SettingKey::Locale => "sezimal-calculator-locale",
            SettingKey::Spellout => "sezimal-calculator-spellout",
            SettingKey::SezimalDigits => "sezimal-calculator-sezimal-digits",
            SettingKey::Grouping => "sezimal-calculator-grouping",
            SettingKey::GroupSeparator => "sezimal-calculator-group-separator",
            SettingKey::PointSeparator => "sezimal-calculator-sezimal-separator",
            SettingKey::Niftimal => "sezimal-calculator-niftimal",
            SettingKey::SezimalPlaces => "sezimal-calculator-sezimal-places",
            SettingKey::UnitType => "sezimal-calculator-unit-type",
            SettingKey::SezimalUnit => "sezimal-calculator-unit",
            SettingKey::DecimalUnit => "sezimal-calculator-decimal-unit",
            SettingKey::SezimalPrefix => "sezimal-calculator-prefix",
            SettingKey::DecimalPrefix => "sezimal-calculator-decimal-prefix",
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SettingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Legal value domain of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// `true` / `false`
    Boolean,
    /// Inclusive integer range
    Integer { min: i64, max: i64 },
    /// Integer from an explicit set
    IntegerSet(&'static [i64]),
    /// One of a fixed list of strings
    Choice(&'static [&'static str]),
    /// Locale tag, stored in canonical `xx_yy` form
    Locale,
    /// Code present in the unit mapping table
    UnitType,
    /// Any string
    Text,
}

/// Typed setting value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl SettingValue {
    /// String form written to the durable store
    pub fn to_stored(&self) -> String {
        match self {
            SettingValue::Bool(b) => b.to_string(),
            SettingValue::Integer(i) => i.to_string(),
            SettingValue::Text(s) => s.clone(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<char> for SettingValue {
    fn from(value: char) -> Self {
        SettingValue::Text(value.to_string())
    }
}

/// Display mode of the optional nif digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NiftimalMode {
    #[default]
    Disabled,
    Compact,
    Full,
}

impl NiftimalMode {
    /// Sentinel string kept in the store
    pub fn as_stored(self) -> &'static str {
        match self {
            NiftimalMode::Disabled => "-",
            NiftimalMode::Compact => "5",
            NiftimalMode::Full => "Z",
        }
    }

    /// Strict parse of a stored sentinel
    pub fn parse_stored(raw: &str) -> Option<Self> {
        match raw {
            "-" => Some(NiftimalMode::Disabled),
            "5" => Some(NiftimalMode::Compact),
            "Z" => Some(NiftimalMode::Full),
            _ => None,
        }
    }

    /// Whether the nif digit row is shown
    pub fn is_visible(self) -> bool {
        self != NiftimalMode::Disabled
    }
}

/// One physical-quantity category offered for conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitTypeEntry {
    /// Short mnemonic (e.g. "pad" for length)
    pub code: &'static str,
    /// Unit symbol on the sezimal side
    pub sezimal_symbol: &'static str,
    /// Unit symbol on the decimal side
    pub decimal_symbol: &'static str,
    /// Other sezimal units of the same quantity
    pub sezimal_variants: &'static [&'static str],
    /// Other decimal units of the same quantity
    pub decimal_variants: &'static [&'static str],
}

impl UnitTypeEntry {
    /// `units` and `prefixes` carry no physical unit
    pub fn is_sentinel(&self) -> bool {
        self.sezimal_symbol.is_empty() && self.decimal_symbol.is_empty()
    }

    /// Whether `symbol` measures this quantity on the sezimal side
    pub fn allows_sezimal(&self, symbol: &str) -> bool {
        !self.is_sentinel()
            && (symbol == self.sezimal_symbol || self.sezimal_variants.contains(&symbol))
    }

    /// Whether `symbol` measures this quantity on the decimal side
    pub fn allows_decimal(&self, symbol: &str) -> bool {
        !self.is_sentinel()
            && (symbol == self.decimal_symbol || self.decimal_variants.contains(&symbol))
    }
}

/// Unit pair shown on the unit toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitLabel {
    pub sezimal: String,
    /// Decimal symbol after locale relabeling
    pub decimal: String,
}

/// Labels derived from a configuration snapshot.
///
/// This is what label-refresh collaborators render. It is recomputed after
/// every change and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub base: u8,
    pub locale: String,
    pub spellout: bool,
    pub sezimal_digits: bool,
    pub grouping: u8,
    pub group_separator: char,
    pub point_separator: char,
    pub niftimal: NiftimalMode,
    pub niftimal_visible: bool,
    pub niftimal_glyph: Option<&'static str>,
    pub sezimal_places: u8,
    pub unit_type: String,
    /// `None` for `units` and `prefixes`
    pub units: Option<UnitLabel>,
}

impl Presentation {
    /// Text of the unit toggle, e.g. `[ Dpad ↔ m ]`
    pub fn unit_toggle_text(&self) -> String {
        match &self.units {
            Some(label) => format!("[ {} ↔ {} ]", label.sezimal, label.decimal),
            None => "[ ↮ ]".to_string(),
        }
    }
}

/// Full set of current setting values, one field per key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSnapshot {
    pub base: u8,
    pub locale: String,
    pub spellout: bool,
    pub sezimal_digits: bool,
    pub grouping: u8,
    pub group_separator: char,
    pub point_separator: char,
    pub niftimal: NiftimalMode,
    pub sezimal_places: u8,
    pub unit_type: String,
    pub sezimal_unit: String,
    pub decimal_unit: String,
    pub sezimal_prefix: String,
    pub decimal_prefix: String,
}

impl ConfigurationSnapshot {
    /// Current value of `key`
    pub fn value_of(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::Base => SettingValue::Integer(self.base.into()),
            SettingKey::Locale => self.locale.clone().into(),
            SettingKey::Spellout => self.spellout.into(),
            SettingKey::SezimalDigits => self.sezimal_digits.into(),
            SettingKey::Grouping => SettingValue::Integer(self.grouping.into()),
            SettingKey::GroupSeparator => self.group_separator.into(),
            SettingKey::PointSeparator => self.point_separator.into(),
            SettingKey::Niftimal => self.niftimal.as_stored().into(),
            SettingKey::SezimalPlaces => SettingValue::Integer(self.sezimal_places.into()),
            SettingKey::UnitType => self.unit_type.clone().into(),
            SettingKey::SezimalUnit => self.sezimal_unit.clone().into(),
            SettingKey::DecimalUnit => self.decimal_unit.clone().into(),
            SettingKey::SezimalPrefix => self.sezimal_prefix.clone().into(),
            SettingKey::DecimalPrefix => self.decimal_prefix.clone().into(),
        }
    }

    /// Assign an already validated value to the field behind `key`.
    ///
    /// Both user operations and bootstrap re-application go through here.
    /// A value of the wrong shape is rejected and leaves the snapshot as is.
    pub fn apply(&mut self, key: SettingKey, value: &SettingValue) -> Result<(), SettingsError> {
        let mismatch = || {
            SettingsError::invalid(key.as_str(), value.to_stored(), "value has the wrong type")
        };
        let small = |v: &SettingValue| {
            v.as_integer()
                .and_then(|i| u8::try_from(i).ok())
                .ok_or_else(mismatch)
        };
        let single = |v: &SettingValue| {
            let text = v.as_text().ok_or_else(mismatch)?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(mismatch()),
            }
        };
        let text = |v: &SettingValue| v.as_text().map(str::to_string).ok_or_else(mismatch);

        match key {
            SettingKey::Base => self.base = small(value)?,
            SettingKey::Locale => self.locale = text(value)?,
            SettingKey::Spellout => self.spellout = value.as_bool().ok_or_else(mismatch)?,
            SettingKey::SezimalDigits => {
                self.sezimal_digits = value.as_bool().ok_or_else(mismatch)?
            }
            SettingKey::Grouping => self.grouping = small(value)?,
            SettingKey::GroupSeparator => self.group_separator = single(value)?,
            SettingKey::PointSeparator => self.point_separator = single(value)?,
            SettingKey::Niftimal => {
                self.niftimal = value
                    .as_text()
                    .and_then(NiftimalMode::parse_stored)
                    .ok_or_else(mismatch)?
            }
            SettingKey::SezimalPlaces => self.sezimal_places = small(value)?,
            SettingKey::UnitType => self.unit_type = text(value)?,
            SettingKey::SezimalUnit => self.sezimal_unit = text(value)?,
            SettingKey::DecimalUnit => self.decimal_unit = text(value)?,
            SettingKey::SezimalPrefix => self.sezimal_prefix = text(value)?,
            SettingKey::DecimalPrefix => self.decimal_prefix = text(value)?,
        }
        Ok(())
    }
}
