//! Configuration schema and the merged configuration handed to the converter.
//!
//! The schema fixes which keys are recognized: string settings and boolean
//! options, each with a built-in default. Every layer is read against it and
//! anything outside the schema is ignored.

use std::collections::BTreeMap;

use serde::Serialize;

/// INI section holding string settings.
pub const SETTINGS_SECTION: &str = "SETTINGS";

/// INI section holding boolean options.
pub const OPTIONS_SECTION: &str = "OPTIONS";

const TIMELINE_SETTINGS: &[(&str, &str)] = &[
    ("section_label", "Section"),
    ("section_color", "170,240,160"),
];

const TIMELINE_OPTIONS: &[(&str, bool)] = &[
    ("ignore_unspecific", false),
    ("dhm_to_datetime", false),
    ("datetime_to_dhm", false),
];

/// Recognized keys and their defaults.
#[derive(Debug, Clone, Copy)]
pub struct ConfigSchema {
    pub settings: &'static [(&'static str, &'static str)],
    pub options: &'static [(&'static str, bool)],
}

impl ConfigSchema {
    /// Schema used for timeline conversions.
    #[must_use]
    pub const fn timeline() -> Self {
        Self {
            settings: TIMELINE_SETTINGS,
            options: TIMELINE_OPTIONS,
        }
    }

    /// A configuration holding nothing but the defaults.
    #[must_use]
    pub fn defaults(&self) -> EffectiveConfiguration {
        EffectiveConfiguration {
            settings: self
                .settings
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            options: self
                .options
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
        }
    }

    #[must_use]
    pub fn has_setting(&self, key: &str) -> bool {
        self.settings.iter().any(|(k, _)| *k == key)
    }

    /// Default value of an option, `None` if the key is not recognized.
    #[must_use]
    pub fn default_option(&self, key: &str) -> Option<bool> {
        self.options.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::timeline()
    }
}

/// Merged settings and options used for one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfiguration {
    pub settings: BTreeMap<String, String>,
    pub options: BTreeMap<String, bool>,
}

#[cfg(test)]
impl EffectiveConfiguration {
    #[must_use]
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn option(&self, key: &str) -> Option<bool> {
        self.options.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_schema() {
        let schema = ConfigSchema::timeline();
        let config = schema.defaults();

        assert_eq!(config.setting("section_label"), Some("Section"));
        assert_eq!(config.setting("section_color"), Some("170,240,160"));
        assert_eq!(config.option("ignore_unspecific"), Some(false));
        assert_eq!(config.options.len(), 3);
    }

    #[test]
    fn test_unknown_keys_are_not_recognized() {
        let schema = ConfigSchema::timeline();
        assert!(!schema.has_setting("font"));
        assert_eq!(schema.default_option("font"), None);
        assert_eq!(schema.default_option("dhm_to_datetime"), Some(false));
    }
}
