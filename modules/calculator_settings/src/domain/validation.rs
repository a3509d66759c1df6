//! Domain validation for setting values

use super::definitions::domain_of;
use super::units;
use crate::contract::{Domain, SettingKey, SettingValue, SettingsError};

/// Canonical locale form: lowercase, `_` as region separator.
///
/// Accepts tags such as "pt-BR", "en_US" or "bz". The language part must be
/// two or three letters; further parts are short alphanumeric subtags.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let canonical = raw.trim().replace('-', "_").to_lowercase();
    let mut parts = canonical.split('_');

    let language = parts.next()?;
    if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }

    let subtags_valid = parts.all(|part| {
        !part.is_empty() && part.len() <= 8 && part.chars().all(|c| c.is_ascii_alphanumeric())
    });
    if !subtags_valid {
        return None;
    }

    Some(canonical)
}

/// Parse a raw stored string into `domain`, `None` when it does not fit
pub fn parse_value(domain: Domain, raw: &str) -> Option<SettingValue> {
    match domain {
        Domain::Boolean => match raw {
            "true" => Some(SettingValue::Bool(true)),
            "false" => Some(SettingValue::Bool(false)),
            _ => None,
        },
        Domain::Integer { min, max } => raw
            .parse::<i64>()
            .ok()
            .filter(|i| (min..=max).contains(i))
            .map(SettingValue::Integer),
        Domain::IntegerSet(allowed) => raw
            .parse::<i64>()
            .ok()
            .filter(|i| allowed.contains(i))
            .map(SettingValue::Integer),
        Domain::Choice(choices) => choices
            .contains(&raw)
            .then(|| SettingValue::Text(raw.to_string())),
        Domain::Locale => normalize_locale(raw).map(SettingValue::Text),
        Domain::UnitType => units::lookup(raw)
            .ok()
            .map(|entry| SettingValue::Text(entry.code.to_string())),
        Domain::Text => Some(SettingValue::Text(raw.to_string())),
    }
}

/// Check a value offered for `key` against its domain.
///
/// Returns the value in canonical form (locales are normalised).
pub fn validate_value(key: SettingKey, value: SettingValue) -> Result<SettingValue, SettingsError> {
    let domain = domain_of(key);
    let raw = value.to_stored();

    let shape_ok = matches!(
        (domain, &value),
        (Domain::Boolean, SettingValue::Bool(_))
            | (Domain::Integer { .. }, SettingValue::Integer(_))
            | (Domain::IntegerSet(_), SettingValue::Integer(_))
            | (Domain::Choice(_), SettingValue::Text(_))
            | (Domain::Locale, SettingValue::Text(_))
            | (Domain::UnitType, SettingValue::Text(_))
            | (Domain::Text, SettingValue::Text(_))
    );
    if !shape_ok {
        return Err(SettingsError::invalid(key.as_str(), raw, "value has the wrong type"));
    }

    parse_value(domain, &raw).ok_or_else(|| {
        SettingsError::invalid(key.as_str(), raw.clone(), describe_domain(domain))
    })
}

/// Interpret what the store returned for `key`.
///
/// `Ok(None)` means the key is absent. A value that does not parse into the
/// key's domain is reported as [`SettingsError::CorruptStoredValue`].
pub fn read_stored(
    key: SettingKey,
    raw: Option<&str>,
) -> Result<Option<SettingValue>, SettingsError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    parse_value(domain_of(key), raw)
        .map(Some)
        .ok_or_else(|| SettingsError::CorruptStoredValue {
            key: key.as_str().to_string(),
            value: raw.to_string(),
        })
}

fn describe_domain(domain: Domain) -> String {
    match domain {
        Domain::Boolean => "expected true or false".to_string(),
        Domain::Integer { min, max } => format!("expected an integer in {}..={}", min, max),
        Domain::IntegerSet(allowed) => format!("expected one of {:?}", allowed),
        Domain::Choice(choices) => format!("expected one of {:?}", choices),
        Domain::Locale => "expected a locale tag such as en_us".to_string(),
        Domain::UnitType => "expected a known unit type code".to_string(),
        Domain::Text => "expected text".to_string(),
    }
}
