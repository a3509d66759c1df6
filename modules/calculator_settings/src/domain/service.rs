//! Domain service - configuration synchronization
//!
//! Owns the in-memory snapshot. Every mutation validates first, persists all
//! affected keys in one store call, swaps the snapshot, and only then
//! notifies the display collaborators.

use super::bootstrap::{self, BootstrapPhase};
use super::definitions::{SettingDefinitions, NO_PREFIX};
use super::events::{DisplayPublisher, SettingsChanged};
use super::niftimal;
use super::repository::SettingsStore;
use super::units;
use super::validation::{normalize_locale, read_stored, validate_value};
use crate::contract::{
    ConfigurationSnapshot, NiftimalMode, Presentation, SettingKey, SettingValue, SettingsError,
    UnitTypeEntry,
};
use parking_lot::Mutex;
use std::sync::Arc;

type Writes = Vec<(SettingKey, SettingValue)>;

struct State {
    phase: BootstrapPhase,
    snapshot: ConfigurationSnapshot,
}

impl State {
    fn initialized(&self) -> Result<&ConfigurationSnapshot, SettingsError> {
        match self.phase {
            BootstrapPhase::Initialized => Ok(&self.snapshot),
            BootstrapPhase::Uninitialized => Err(SettingsError::NotInitialized),
        }
    }
}

/// Domain service for calculator settings
pub struct Service {
    store: Arc<dyn SettingsStore>,
    publisher: Arc<dyn DisplayPublisher>,
    definitions: SettingDefinitions,
    /// One operation at a time; held across validate, persist and swap
    state: Mutex<State>,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        store: Arc<dyn SettingsStore>,
        publisher: Arc<dyn DisplayPublisher>,
        definitions: SettingDefinitions,
    ) -> Self {
        let snapshot = definitions.snapshot();
        Self {
            store,
            publisher,
            definitions,
            state: Mutex::new(State {
                phase: BootstrapPhase::Uninitialized,
                snapshot,
            }),
        }
    }

    pub fn definitions(&self) -> &SettingDefinitions {
        &self.definitions
    }

    // ===== Lifecycle =====

    /// Seed absent keys, heal corrupt ones and re-apply everything.
    ///
    /// Runs once; later calls return the current snapshot and notify nobody.
    pub fn bootstrap(&self) -> Result<ConfigurationSnapshot, SettingsError> {
        let mut state = self.state.lock();
        if state.phase == BootstrapPhase::Initialized {
            tracing::debug!("Calculator settings already bootstrapped");
            return Ok(state.snapshot.clone());
        }

        let seeded = bootstrap::seed(self.store.as_ref(), &self.definitions)?;
        let reapplied = bootstrap::reapply(&self.definitions, &seeded.values)?;
        self.persist(&reapplied.repairs)?;

        state.snapshot = reapplied.snapshot;
        state.phase = BootstrapPhase::Initialized;
        let snapshot = state.snapshot.clone();
        drop(state);

        tracing::info!(
            seeded = seeded.seeded.len(),
            healed = seeded.healed.len(),
            repaired = reapplied.repairs.len(),
            "Calculator settings bootstrapped"
        );

        self.publish(SettingKey::ALL.to_vec(), &snapshot);
        Ok(snapshot)
    }

    // ===== Numeral display =====

    pub fn set_base(&self, base: u8) -> Result<(), SettingsError> {
        self.set_single(SettingKey::Base, SettingValue::Integer(base.into()))
    }

    /// Store the locale in canonical form; unit labels are re-derived with it
    pub fn set_locale(&self, locale: &str) -> Result<(), SettingsError> {
        let canonical = normalize_locale(locale).ok_or_else(|| {
            SettingsError::invalid(
                SettingKey::Locale.as_str(),
                locale,
                "expected a locale tag such as en_us",
            )
        });
        let canonical = self.reject_logged(canonical)?;
        self.set_single(SettingKey::Locale, canonical.into())
    }

    pub fn set_spellout(&self, enabled: bool) -> Result<(), SettingsError> {
        self.set_single(SettingKey::Spellout, enabled.into())
    }

    pub fn set_sezimal_digits(&self, enabled: bool) -> Result<(), SettingsError> {
        self.set_single(SettingKey::SezimalDigits, enabled.into())
    }

    pub fn set_grouping(&self, size: u8) -> Result<(), SettingsError> {
        self.set_single(SettingKey::Grouping, SettingValue::Integer(size.into()))
    }

    pub fn set_sezimal_places(&self, places: u8) -> Result<(), SettingsError> {
        self.set_single(SettingKey::SezimalPlaces, SettingValue::Integer(places.into()))
    }

    /// Rejected when equal to the current point separator
    pub fn set_group_separator(&self, separator: char) -> Result<(), SettingsError> {
        self.commit(|snapshot| {
            let value = validate_value(SettingKey::GroupSeparator, separator.into())?;
            if separator == snapshot.point_separator {
                return Err(SettingsError::invalid(
                    SettingKey::GroupSeparator.as_str(),
                    value.to_stored(),
                    "must differ from the point separator",
                ));
            }
            Ok(vec![(SettingKey::GroupSeparator, value)])
        })
        .map(drop)
    }

    /// Rejected when equal to the current group separator
    pub fn set_point_separator(&self, separator: char) -> Result<(), SettingsError> {
        self.commit(|snapshot| {
            let value = validate_value(SettingKey::PointSeparator, separator.into())?;
            if separator == snapshot.group_separator {
                return Err(SettingsError::invalid(
                    SettingKey::PointSeparator.as_str(),
                    value.to_stored(),
                    "must differ from the group separator",
                ));
            }
            Ok(vec![(SettingKey::PointSeparator, value)])
        })
        .map(drop)
    }

    /// Advance the niftimal mode.
    ///
    /// The current mode is re-read from the store, so a corrupt stored value
    /// counts as disabled and moves to compact.
    pub fn cycle_niftimal(&self) -> Result<NiftimalMode, SettingsError> {
        let snapshot = self.commit(|_| {
            let raw = self
                .store
                .get(SettingKey::Niftimal.as_str())
                .map_err(SettingsError::storage)?;
            let next = niftimal::advance(niftimal::mode_from_store(raw.as_deref()));
            Ok(vec![(SettingKey::Niftimal, next.as_stored().into())])
        })?;
        Ok(snapshot.niftimal)
    }

    // ===== Units =====

    /// Select a unit type.
    ///
    /// Writes the unit type, both symbols from the mapping table and resets
    /// both prefixes, all in one store call. An unknown code writes nothing.
    pub fn select_unit_type(&self, code: &str) -> Result<&'static UnitTypeEntry, SettingsError> {
        let entry = self.reject_logged(units::lookup(code))?;

        self.commit(|_| {
            Ok(vec![
                (SettingKey::UnitType, entry.code.into()),
                (SettingKey::SezimalUnit, entry.sezimal_symbol.into()),
                (SettingKey::DecimalUnit, entry.decimal_symbol.into()),
                (SettingKey::SezimalPrefix, NO_PREFIX.into()),
                (SettingKey::DecimalPrefix, NO_PREFIX.into()),
            ])
        })?;
        Ok(entry)
    }

    pub fn set_sezimal_unit(&self, symbol: &str) -> Result<(), SettingsError> {
        self.set_unit_symbol(SettingKey::SezimalUnit, symbol)
    }

    pub fn set_decimal_unit(&self, symbol: &str) -> Result<(), SettingsError> {
        self.set_unit_symbol(SettingKey::DecimalUnit, symbol)
    }

    /// Only symbols measuring the current unit type's quantity are accepted
    fn set_unit_symbol(&self, key: SettingKey, symbol: &str) -> Result<(), SettingsError> {
        self.commit(|snapshot| {
            let entry = units::lookup(&snapshot.unit_type)?;
            if entry.is_sentinel() {
                return Err(SettingsError::invalid(
                    key.as_str(),
                    symbol,
                    format!("unit type '{}' has no unit symbols", entry.code),
                ));
            }
            if symbol.trim().is_empty() {
                return Err(SettingsError::invalid(key.as_str(), symbol, "unit symbol is blank"));
            }
            if !units::allows_symbol(entry, key, symbol) {
                return Err(SettingsError::invalid(
                    key.as_str(),
                    symbol,
                    format!("not a unit of unit type '{}'", entry.code),
                ));
            }
            Ok(vec![(key, symbol.into())])
        })
        .map(drop)
    }

    // ===== Reads =====

    pub fn snapshot(&self) -> Result<ConfigurationSnapshot, SettingsError> {
        self.state.lock().initialized().cloned()
    }

    pub fn presentation(&self) -> Result<Presentation, SettingsError> {
        let state = self.state.lock();
        state.initialized().map(Presentation::from_snapshot)
    }

    /// Fresh read of `key` from the store.
    ///
    /// Absent or corrupt values yield the default; corrupt ones are logged.
    pub fn read_setting(&self, key: SettingKey) -> Result<SettingValue, SettingsError> {
        let raw = self
            .store
            .get(key.as_str())
            .map_err(SettingsError::storage)?;

        match read_stored(key, raw.as_deref()) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(self.definitions.default_value(key)),
            Err(error) => {
                tracing::warn!(%error, "Substituting default for corrupt stored setting");
                Ok(self.definitions.default_value(key))
            }
        }
    }

    // ===== Helper Methods =====

    fn set_single(&self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        self.commit(|_| Ok(vec![(key, validate_value(key, value)?)]))
            .map(drop)
    }

    /// Run one mutation under the state lock.
    ///
    /// `plan` sees the current snapshot and returns validated writes. Nothing
    /// is stored or swapped unless planning, applying and persisting all
    /// succeed. Collaborators are notified after the lock is released.
    fn commit<F>(&self, plan: F) -> Result<ConfigurationSnapshot, SettingsError>
    where
        F: FnOnce(&ConfigurationSnapshot) -> Result<Writes, SettingsError>,
    {
        let mut state = self.state.lock();
        let current = state.initialized()?;

        let writes = self.reject_logged(plan(current))?;
        let mut candidate = current.clone();
        for (key, value) in &writes {
            candidate.apply(*key, value)?;
        }
        self.persist(&writes)?;

        for (key, value) in &writes {
            tracing::debug!(key = %key, value = %value.to_stored(), "Setting updated");
        }
        state.snapshot = candidate.clone();
        drop(state);

        let keys = writes.into_iter().map(|(key, _)| key).collect();
        self.publish(keys, &candidate);
        Ok(candidate)
    }

    fn persist(&self, writes: &[(SettingKey, SettingValue)]) -> Result<(), SettingsError> {
        if writes.is_empty() {
            return Ok(());
        }
        let entries: Vec<(&str, String)> = writes
            .iter()
            .map(|(key, value)| (key.as_str(), value.to_stored()))
            .collect();
        self.store
            .set_many(&entries)
            .map_err(SettingsError::storage)
    }

    fn publish(&self, keys: Vec<SettingKey>, snapshot: &ConfigurationSnapshot) {
        let change = SettingsChanged::new(keys, Presentation::from_snapshot(snapshot));
        self.publisher.refresh_labels(&change);
        self.publisher.recompute_display();
    }

    fn reject_logged<T>(&self, result: Result<T, SettingsError>) -> Result<T, SettingsError> {
        if let Err(error) = &result {
            tracing::warn!(%error, "Rejected settings change");
        }
        result
    }
}
