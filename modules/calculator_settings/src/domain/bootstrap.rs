//! Bootstrap initializer
//!
//! Runs once per process. Seeds every absent key with its default, replaces
//! corrupt values, then rebuilds the in-memory snapshot by re-applying the
//! stored values in a fixed order.

use super::definitions::SettingDefinitions;
use super::repository::SettingsStore;
use super::units;
use super::validation::read_stored;
use crate::contract::{ConfigurationSnapshot, SettingKey, SettingValue, SettingsError};
use std::collections::BTreeMap;

/// Lifecycle of the settings service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootstrapPhase {
    #[default]
    Uninitialized,
    Initialized,
}

/// One re-application step; later steps may read what earlier ones set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReapplyStep {
    Base,
    Locale,
    Spellout,
    Grouping,
    SezimalDigits,
    Niftimal,
    SezimalPlaces,
    UnitType,
}

impl ReapplyStep {
    pub const ORDER: [ReapplyStep; 8] = [
        ReapplyStep::Base,
        ReapplyStep::Locale,
        ReapplyStep::Spellout,
        ReapplyStep::Grouping,
        ReapplyStep::SezimalDigits,
        ReapplyStep::Niftimal,
        ReapplyStep::SezimalPlaces,
        ReapplyStep::UnitType,
    ];

    /// Keys re-applied by this step
    pub fn keys(self) -> &'static [SettingKey] {
        match self {
            ReapplyStep::Base => &[SettingKey::Base],
            ReapplyStep::Locale => &[SettingKey::Locale],
            ReapplyStep::Spellout => &[SettingKey::Spellout],
            ReapplyStep::Grouping => &[
                SettingKey::Grouping,
                SettingKey::GroupSeparator,
                SettingKey::PointSeparator,
            ],
            ReapplyStep::SezimalDigits => &[SettingKey::SezimalDigits],
            ReapplyStep::Niftimal => &[SettingKey::Niftimal],
            ReapplyStep::SezimalPlaces => &[SettingKey::SezimalPlaces],
            ReapplyStep::UnitType => &[
                SettingKey::UnitType,
                SettingKey::SezimalUnit,
                SettingKey::DecimalUnit,
                SettingKey::SezimalPrefix,
                SettingKey::DecimalPrefix,
            ],
        }
    }
}

/// Outcome of seeding the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seeded {
    /// Validated value of every key
    pub values: BTreeMap<SettingKey, SettingValue>,
    /// Keys that were absent and got their default
    pub seeded: Vec<SettingKey>,
    /// Keys whose stored value was replaced
    pub healed: Vec<SettingKey>,
}

/// Read every key, writing defaults for absent or corrupt ones
pub fn seed(
    store: &dyn SettingsStore,
    definitions: &SettingDefinitions,
) -> Result<Seeded, SettingsError> {
    let mut values = BTreeMap::new();
    let mut seeded = Vec::new();
    let mut healed = Vec::new();
    let mut writes: Vec<(&str, String)> = Vec::new();

    for key in SettingKey::ALL {
        let raw = store.get(key.as_str()).map_err(SettingsError::storage)?;

        let value = match read_stored(key, raw.as_deref()) {
            Ok(Some(value)) => {
                // locales read back in canonical form
                if raw.as_deref() != Some(value.to_stored().as_str()) {
                    healed.push(key);
                    writes.push((key.as_str(), value.to_stored()));
                }
                value
            }
            Ok(None) => {
                let value = definitions.default_value(key);
                seeded.push(key);
                writes.push((key.as_str(), value.to_stored()));
                value
            }
            Err(error) => {
                tracing::warn!(%error, "Replacing corrupt stored setting with its default");
                let value = definitions.default_value(key);
                healed.push(key);
                writes.push((key.as_str(), value.to_stored()));
                value
            }
        };
        values.insert(key, value);
    }

    if !writes.is_empty() {
        store.set_many(&writes).map_err(SettingsError::storage)?;
    }

    Ok(Seeded {
        values,
        seeded,
        healed,
    })
}

/// Snapshot rebuilt from seeded values, plus repairs to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reapplied {
    pub snapshot: ConfigurationSnapshot,
    pub repairs: Vec<(SettingKey, SettingValue)>,
}

/// Re-apply `values` step by step in [`ReapplyStep::ORDER`]
pub fn reapply(
    definitions: &SettingDefinitions,
    values: &BTreeMap<SettingKey, SettingValue>,
) -> Result<Reapplied, SettingsError> {
    let mut snapshot = definitions.snapshot();
    let mut repairs = Vec::new();

    for step in ReapplyStep::ORDER {
        for &key in step.keys() {
            let value = values
                .get(&key)
                .cloned()
                .unwrap_or_else(|| definitions.default_value(key));
            snapshot.apply(key, &value)?;
        }

        match step {
            ReapplyStep::Grouping => {
                reconcile_separators(definitions, &mut snapshot, &mut repairs)?
            }
            ReapplyStep::UnitType => reconcile_units(&mut snapshot, &mut repairs)?,
            _ => {}
        }
    }

    Ok(Reapplied { snapshot, repairs })
}

fn repair(
    snapshot: &mut ConfigurationSnapshot,
    repairs: &mut Vec<(SettingKey, SettingValue)>,
    key: SettingKey,
    value: SettingValue,
) -> Result<(), SettingsError> {
    tracing::warn!(key = %key, value = %value.to_stored(), "Repairing inconsistent stored setting");
    snapshot.apply(key, &value)?;
    repairs.push((key, value));
    Ok(())
}

/// Group and point separators must differ
fn reconcile_separators(
    definitions: &SettingDefinitions,
    snapshot: &mut ConfigurationSnapshot,
    repairs: &mut Vec<(SettingKey, SettingValue)>,
) -> Result<(), SettingsError> {
    if snapshot.group_separator == snapshot.point_separator {
        let value = definitions.default_value(SettingKey::GroupSeparator);
        repair(snapshot, repairs, SettingKey::GroupSeparator, value)?;
    }
    Ok(())
}

/// Sentinel unit types carry no symbols; physical ones carry symbols of their
/// own quantity, falling back to the table pair
fn reconcile_units(
    snapshot: &mut ConfigurationSnapshot,
    repairs: &mut Vec<(SettingKey, SettingValue)>,
) -> Result<(), SettingsError> {
    let entry = units::lookup(&snapshot.unit_type)?;

    let expected = [
        (SettingKey::SezimalUnit, snapshot.sezimal_unit.clone(), entry.sezimal_symbol),
        (SettingKey::DecimalUnit, snapshot.decimal_unit.clone(), entry.decimal_symbol),
    ];
    for (key, stored, default) in expected {
        let fits = if entry.is_sentinel() {
            stored.is_empty()
        } else {
            units::allows_symbol(entry, key, &stored)
        };
        if !fits {
            repair(snapshot, repairs, key, default.into())?;
        }
    }

    Ok(())
}
