//! Unit mapping table and locale-conditional relabeling

use crate::contract::{SettingKey, SettingsError, UnitTypeEntry};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Raw number conversion, no physical unit
pub const UNITS: &str = "units";
/// Prefix conversion, no physical unit
pub const PREFIXES: &str = "prefixes";

const fn sentinel(code: &'static str) -> UnitTypeEntry {
    UnitTypeEntry {
        code,
        sezimal_symbol: "",
        decimal_symbol: "",
        sezimal_variants: &[],
        decimal_variants: &[],
    }
}

/// The first symbol on each side is the one selected with the unit type
const fn entry(
    code: &'static str,
    sezimal: &'static [&'static str],
    decimal: &'static [&'static str],
) -> UnitTypeEntry {
    let (sezimal_symbol, sezimal_variants) = match sezimal {
        [first, rest @ ..] => (*first, rest),
        [] => ("", sezimal),
    };
    let (decimal_symbol, decimal_variants) = match decimal {
        [first, rest @ ..] => (*first, rest),
        [] => ("", decimal),
    };
    UnitTypeEntry {
        code,
        sezimal_symbol,
        decimal_symbol,
        sezimal_variants,
        decimal_variants,
    }
}

/// Every unit type offered for conversion, in menu order
pub static UNIT_TYPES: &[UnitTypeEntry] = &[
    sentinel(UNITS),
    sentinel(PREFIXES),
    // time and frequency
    entry("ang", &["agm", "uta"], &["s", "min", "h", "day"]),
    entry("avt", &["avt"], &["Hz"]),
    // length, area, volume, speed, acceleration
    entry("pad", &["Dpad", "pad"], &["m", "km", "cm", "mm", "mi", "yd", "ft", "in"]),
    entry("kex", &["Dkex", "kex"], &["m2", "km2"]),
    entry("ayt", &["Dayt", "ayt"], &["L", "m3"]),
    entry("veg", &["veg"], &["km/h", "m/s", "mph"]),
    entry("tvr", &["tvr"], &["m/s2"]),
    // mass, density, force, pressure
    entry("drv", &["Ddrv", "drv"], &["kg"]),
    entry("gan", &["gan"], &["kg/L", "kg/m3"]),
    entry("bar", &["Dbar", "bar"], &["N"]),
    entry("dab", &["Ddab", "dab"], &["kPa", "Pa"]),
    // energy, power, temperature, heat
    entry("kry", &["DXkry", "kry"], &["kWh", "J"]),
    entry("xat", &["Dxat", "xat"], &["W", "kW"]),
    entry("gtk", &["Xgtk", "gtk"], &["K"]),
    entry("tap", &["tap"], &["°C"]),
    entry("agn", &["agn"], &["J/K"]),
    entry("idn", &["idn"], &["J/K/kg"]),
    entry("tln", &["tln"], &["J/K/m3"]),
    // electricity and magnetism
    entry("avx", &["Xavx", "avx"], &["mAh", "C"]),
    entry("dar", &["Tdar", "dar"], &["A"]),
    entry("vbv", &["vbv"], &["V"]),
    entry("ptr", &["ptr"], &["Ω"]),
    entry("cln", &["cln"], &["S"]),
    entry("prk", &["prk"], &["H"]),
    entry("sam", &["sam"], &["F"]),
    entry("abv", &["abv"], &["Wb"]),
    entry("vtr", &["vtr"], &["T"]),
    // angles and ratios
    entry("prd", &["tprd", "prd"], &["deg"]),
    entry("gol", &["gol"], &["sr"]),
    entry("prt", &["dprt", "prt"], &["%", "‰"]),
    // information
    entry("atk", &["DXatk", "atk"], &["GiB"]),
    entry("pvn", &["Xpvn", "pvn"], &["Mbps"]),
];

fn index() -> &'static HashMap<&'static str, &'static UnitTypeEntry> {
    static INDEX: OnceLock<HashMap<&'static str, &'static UnitTypeEntry>> = OnceLock::new();
    INDEX.get_or_init(|| UNIT_TYPES.iter().map(|e| (e.code, e)).collect())
}

/// Find the entry for `code` (case-sensitive)
pub fn lookup(code: &str) -> Result<&'static UnitTypeEntry, SettingsError> {
    index()
        .get(code)
        .copied()
        .ok_or_else(|| SettingsError::UnknownUnitType {
            code: code.to_string(),
        })
}

/// All codes, in menu order
pub fn codes() -> impl Iterator<Item = &'static str> {
    UNIT_TYPES.iter().map(|e| e.code)
}

/// Whether `code` names one of the two symbol-less categories
pub fn is_sentinel(code: &str) -> bool {
    code == UNITS || code == PREFIXES
}

/// Whether `symbol` may be stored under `key` for unit type `entry`
pub fn allows_symbol(entry: &UnitTypeEntry, key: SettingKey, symbol: &str) -> bool {
    match key {
        SettingKey::SezimalUnit => entry.allows_sezimal(symbol),
        SettingKey::DecimalUnit => entry.allows_decimal(symbol),
        _ => false,
    }
}

struct Relabel {
    locale_prefix: &'static str,
    token: &'static str,
    replacement: &'static str,
}

const LOCALE_RELABELS: &[Relabel] = &[
    Relabel {
        locale_prefix: "pt",
        token: "day",
        replacement: "dia",
    },
    Relabel {
        locale_prefix: "bz",
        token: "day",
        replacement: "dia",
    },
];

/// Decimal unit symbol as shown for `locale`.
///
/// Only a trailing token is rewritten; the stored symbol is left alone.
pub fn display_decimal_symbol<'a>(symbol: &'a str, locale: &str) -> Cow<'a, str> {
    for relabel in LOCALE_RELABELS {
        if !locale.starts_with(relabel.locale_prefix) {
            continue;
        }
        if let Some(stem) = symbol.strip_suffix(relabel.token) {
            return Cow::Owned(format!("{}{}", stem, relabel.replacement));
        }
    }
    Cow::Borrowed(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let unique: HashSet<_> = codes().collect();
        assert_eq!(unique.len(), UNIT_TYPES.len());
        assert!(UNIT_TYPES.len() >= 30);
    }

    #[test]
    fn test_only_sentinels_have_empty_symbols() {
        for entry in UNIT_TYPES {
            let empty = entry.sezimal_symbol.is_empty() || entry.decimal_symbol.is_empty();
            assert_eq!(empty, is_sentinel(entry.code), "{}", entry.code);
            assert_eq!(entry.is_sentinel(), is_sentinel(entry.code), "{}", entry.code);
        }
    }

    #[test]
    fn test_variants_are_distinct_from_defaults() {
        for entry in UNIT_TYPES {
            assert!(!entry.sezimal_variants.contains(&entry.sezimal_symbol), "{}", entry.code);
            assert!(!entry.decimal_variants.contains(&entry.decimal_symbol), "{}", entry.code);
            for symbol in entry.sezimal_variants.iter().chain(entry.decimal_variants) {
                assert!(!symbol.trim().is_empty(), "{}", entry.code);
            }
        }
    }

    #[test]
    fn test_allows_symbol_stays_within_quantity() {
        let pad = lookup("pad").unwrap();
        assert!(allows_symbol(pad, SettingKey::SezimalUnit, "Dpad"));
        assert!(allows_symbol(pad, SettingKey::SezimalUnit, "pad"));
        assert!(allows_symbol(pad, SettingKey::DecimalUnit, "km"));
        assert!(!allows_symbol(pad, SettingKey::DecimalUnit, "kWh"));
        assert!(!allows_symbol(pad, SettingKey::SezimalUnit, "m"));
        assert!(!allows_symbol(pad, SettingKey::UnitType, "pad"));

        let units = lookup(UNITS).unwrap();
        assert!(!allows_symbol(units, SettingKey::SezimalUnit, ""));
    }

    #[test]
    fn test_lookup() {
        let pad = lookup("pad").unwrap();
        assert_eq!(pad.sezimal_symbol, "Dpad");
        assert_eq!(pad.decimal_symbol, "m");

        let prd = lookup("prd").unwrap();
        assert_eq!(prd.sezimal_symbol, "tprd");
        assert_eq!(prd.decimal_symbol, "deg");
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(
            lookup("xyz"),
            Err(SettingsError::UnknownUnitType {
                code: "xyz".to_string()
            })
        );
        assert!(lookup("Pad").is_err());
        assert!(lookup("").is_err());
    }

    #[test]
    fn test_relabel_day_for_portuguese() {
        assert_eq!(display_decimal_symbol("day", "pt_pt"), "dia");
        assert_eq!(display_decimal_symbol("day", "pt_br"), "dia");
        assert_eq!(display_decimal_symbol("day", "bz"), "dia");
        assert_eq!(display_decimal_symbol("m/day", "pt"), "m/dia");
    }

    #[test]
    fn test_relabel_leaves_other_locales_alone() {
        assert_eq!(display_decimal_symbol("day", "en_us"), "day");
        assert_eq!(display_decimal_symbol("day", "es"), "day");
    }

    #[test]
    fn test_relabel_only_trailing_token() {
        assert_eq!(display_decimal_symbol("days", "pt_pt"), "days");
        assert_eq!(display_decimal_symbol("day/m", "pt_pt"), "day/m");
        assert!(matches!(display_decimal_symbol("kWh", "pt_pt"), Cow::Borrowed("kWh")));
    }
}
