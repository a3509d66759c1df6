//! Configuration for the calculator settings module

use crate::domain::definitions::FALLBACK_LOCALE;
use crate::domain::validation::normalize_locale;
use serde::Deserialize;
use std::path::PathBuf;

/// Calculator settings configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Locale seeded on first run; detected from the environment when unset
    #[serde(default)]
    pub default_locale: Option<String>,

    /// Locale used when neither the config nor the environment names one
    #[serde(default = "default_fallback_locale")]
    pub fallback_locale: String,

    /// JSON file holding the settings; in-memory when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_locale: None,
            fallback_locale: default_fallback_locale(),
            store_path: None,
        }
    }
}

impl Config {
    /// Parse a YAML document
    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Locale to seed on first run, in canonical form
    pub fn seed_locale(&self) -> String {
        self.default_locale
            .as_deref()
            .and_then(normalize_locale)
            .or_else(detect_host_locale)
            .or_else(|| normalize_locale(&self.fallback_locale))
            .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
    }
}

fn default_fallback_locale() -> String {
    FALLBACK_LOCALE.to_string()
}

fn detect_host_locale() -> Option<String> {
    locale_from_env(|var| std::env::var(var).ok())
}

/// The first of `LC_ALL`, `LC_MESSAGES`, `LANG` that is set and non-empty
/// decides; a `C` or `POSIX` value there names no locale
fn locale_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(&lookup)
        .find(|value| !value.is_empty())
        .and_then(|value| locale_from_posix(&value))
}

/// "pt_BR.UTF-8" → "pt_br"; "C" and "POSIX" name no locale
fn locale_from_posix(raw: &str) -> Option<String> {
    let tag = raw.split(['.', '@']).next().unwrap_or_default();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    normalize_locale(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.default_locale.is_none());
        assert!(config.store_path.is_none());
        assert_eq!(config.fallback_locale, "en_us");
    }

    #[test]
    fn test_from_yaml() {
        let config = Config::from_yaml(
            "default_locale: pt-PT\nstore_path: /tmp/sezimal/settings.json\n",
        )
        .unwrap();
        assert_eq!(config.default_locale.as_deref(), Some("pt-PT"));
        assert_eq!(config.fallback_locale, "en_us");
        assert_eq!(
            config.store_path,
            Some(PathBuf::from("/tmp/sezimal/settings.json"))
        );
        assert_eq!(config.seed_locale(), "pt_pt");
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        assert!(Config::from_yaml("locale: pt_pt\n").is_err());
    }

    #[test]
    fn test_locale_from_posix() {
        assert_eq!(locale_from_posix("pt_BR.UTF-8").as_deref(), Some("pt_br"));
        assert_eq!(locale_from_posix("de_DE@euro").as_deref(), Some("de_de"));
        assert_eq!(locale_from_posix("en_US").as_deref(), Some("en_us"));
        assert_eq!(locale_from_posix("C.UTF-8"), None);
        assert_eq!(locale_from_posix("POSIX"), None);
        assert_eq!(locale_from_posix(""), None);
    }

    fn env(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |var: &str| vars.get(var).map(|value| value.to_string())
    }

    #[test]
    fn test_first_set_variable_decides() {
        assert_eq!(
            locale_from_env(env(&[("LC_ALL", "C"), ("LANG", "pt_BR.UTF-8")])),
            None
        );
        assert_eq!(
            locale_from_env(env(&[("LC_MESSAGES", "de_DE"), ("LANG", "pt_BR.UTF-8")])).as_deref(),
            Some("de_de")
        );
        assert_eq!(
            locale_from_env(env(&[("LC_ALL", ""), ("LANG", "pt_BR.UTF-8")])).as_deref(),
            Some("pt_br")
        );
        assert_eq!(locale_from_env(env(&[])), None);
    }
}
