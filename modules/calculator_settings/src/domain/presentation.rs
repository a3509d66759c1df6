//! Presentation derived from a configuration snapshot

use super::{niftimal, units};
use crate::contract::{ConfigurationSnapshot, Presentation, UnitLabel};

impl Presentation {
    pub fn from_snapshot(snapshot: &ConfigurationSnapshot) -> Self {
        let units = if units::is_sentinel(&snapshot.unit_type) {
            None
        } else {
            Some(UnitLabel {
                sezimal: snapshot.sezimal_unit.clone(),
                decimal: units::display_decimal_symbol(&snapshot.decimal_unit, &snapshot.locale)
                    .into_owned(),
            })
        };

        Self {
            base: snapshot.base,
            locale: snapshot.locale.clone(),
            spellout: snapshot.spellout,
            sezimal_digits: snapshot.sezimal_digits,
            grouping: snapshot.grouping,
            group_separator: snapshot.group_separator,
            point_separator: snapshot.point_separator,
            niftimal: snapshot.niftimal,
            niftimal_visible: snapshot.niftimal.is_visible(),
            niftimal_glyph: niftimal::glyph(snapshot.niftimal, snapshot.sezimal_digits),
            sezimal_places: snapshot.sezimal_places,
            unit_type: snapshot.unit_type.clone(),
            units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::NiftimalMode;
    use crate::domain::definitions::SettingDefinitions;

    #[test]
    fn test_sentinel_unit_type_suppresses_units() {
        let mut snapshot = SettingDefinitions::default().snapshot();
        for code in [units::UNITS, units::PREFIXES] {
            snapshot.unit_type = code.to_string();
            let presentation = Presentation::from_snapshot(&snapshot);
            assert!(presentation.units.is_none());
            assert_eq!(presentation.unit_toggle_text(), "[ ↮ ]");
        }
    }

    #[test]
    fn test_unit_label_is_relabeled_for_locale() {
        let mut snapshot = SettingDefinitions::new("pt_pt").snapshot();
        snapshot.unit_type = "ang".to_string();
        snapshot.sezimal_unit = "agm".to_string();
        snapshot.decimal_unit = "day".to_string();

        let presentation = Presentation::from_snapshot(&snapshot);
        assert_eq!(presentation.unit_toggle_text(), "[ agm ↔ dia ]");
        assert_eq!(snapshot.decimal_unit, "day");
    }

    #[test]
    fn test_niftimal_fields() {
        let mut snapshot = SettingDefinitions::default().snapshot();
        assert!(!Presentation::from_snapshot(&snapshot).niftimal_visible);

        snapshot.niftimal = NiftimalMode::Full;
        let presentation = Presentation::from_snapshot(&snapshot);
        assert!(presentation.niftimal_visible);
        assert_eq!(presentation.niftimal_glyph, Some("Z"));
    }
}
