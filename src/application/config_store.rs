//! Layered configuration loading.
//!
//! Starts from the schema defaults and overlays each INI layer in order.
//! Missing layers are normal; broken layers are skipped as a whole so one bad
//! file never costs the user the rest of their settings.

use std::path::Path;

use crate::domain::{
    AppError, ConfigSchema, EffectiveConfiguration, Result, OPTIONS_SECTION, SETTINGS_SECTION,
};
use crate::infrastructure::IniDocument;

/// Loads and merges configuration layers against a fixed schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigStore {
    schema: ConfigSchema,
}

impl ConfigStore {
    /// Merge `layers` over the defaults; later layers win.
    pub fn load<P: AsRef<Path>>(&self, layers: &[P]) -> EffectiveConfiguration {
        let mut config = self.schema.defaults();

        for path in layers.iter().map(AsRef::as_ref) {
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "Configuration layer not present");
                continue;
            }

            match IniDocument::read(path) {
                Ok(doc) => {
                    tracing::debug!(path = %path.display(), "Applying configuration layer");
                    self.overlay(&mut config, &doc);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping malformed configuration layer");
                }
            }
        }

        config
    }

    fn overlay(&self, config: &mut EffectiveConfiguration, doc: &IniDocument) {
        if let Some(settings) = doc.section(SETTINGS_SECTION) {
            for (key, value) in settings {
                if self.schema.has_setting(key) {
                    config.settings.insert(key.clone(), value.clone());
                }
            }
        }

        if let Some(options) = doc.section(OPTIONS_SECTION) {
            for (key, value) in options {
                let Some(default) = self.schema.default_option(key) else {
                    continue;
                };
                let parsed = parse_bool(value).unwrap_or_else(|| {
                    tracing::warn!(key = %key, value = %value, "Option is not a boolean, using default");
                    default
                });
                config.options.insert(key.clone(), parsed);
            }
        }
    }

    /// Render a configuration as an INI document.
    #[must_use]
    pub fn to_document(&self, config: &EffectiveConfiguration) -> IniDocument {
        let mut doc = IniDocument::default();
        for (key, value) in &config.settings {
            doc.set(SETTINGS_SECTION, key, value.clone());
        }
        for (key, value) in &config.options {
            doc.set(OPTIONS_SECTION, key, if *value { "Yes" } else { "No" });
        }
        doc
    }

    /// Write a configuration layer to `path`.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn write(&self, path: &Path, config: &EffectiveConfiguration) -> Result<()> {
        self.to_document(config).write(path)?;
        tracing::info!(path = %path.display(), "Configuration written");
        Ok(())
    }

    /// Create a new layer at `path` holding the schema defaults.
    ///
    /// # Errors
    /// Returns error if `path` already exists or cannot be written.
    pub fn init_layer(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(AppError::Config {
                message: format!("{} already exists", path.display()),
            });
        }
        self.write(path, &self.schema.defaults())
    }
}

/// Parse an INI boolean (`yes/no`, `true/false`, `on/off`, `1/0`).
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_no_layers_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::default();

        let config = store.load(&[dir.path().join("a.ini"), dir.path().join("b.ini")]);

        assert_eq!(config, ConfigSchema::timeline().defaults());
    }

    #[test]
    fn test_later_layer_wins() {
        let dir = tempdir().unwrap();
        let user = write(
            dir.path(),
            "user.ini",
            "[SETTINGS]\nsection_label = Chapter\nsection_color = 1,1,1\n[OPTIONS]\ndhm_to_datetime = yes\n",
        );
        let project = write(
            dir.path(),
            "project.ini",
            "[SETTINGS]\nsection_label = Scene\n",
        );

        let config = ConfigStore::default().load(&[user, project]);

        assert_eq!(config.setting("section_label"), Some("Scene"));
        assert_eq!(config.setting("section_color"), Some("1,1,1"));
        assert_eq!(config.option("dhm_to_datetime"), Some(true));
        assert_eq!(config.option("datetime_to_dhm"), Some(false));
    }

    #[test]
    fn test_malformed_layer_is_skipped() {
        let dir = tempdir().unwrap();
        let user = write(
            dir.path(),
            "user.ini",
            "[SETTINGS]\nsection_label = Chapter\n[OPTIONS]\nignore_unspecific = true\n",
        );
        let broken = write(
            dir.path(),
            "project.ini",
            "section_label = Scene\n[OPTIONS\n",
        );

        let store = ConfigStore::default();
        assert_eq!(
            store.load(&[user.clone(), broken]),
            store.load(&[user])
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        let layer = write(
            dir.path(),
            "plugin.ini",
            "[SETTINGS]\nfont = Serif\n[OPTIONS]\nspell_check = yes\n[EXTRA]\nsection_label = X\n",
        );

        let config = ConfigStore::default().load(&[layer]);

        assert_eq!(config, ConfigSchema::timeline().defaults());
    }

    #[test]
    fn test_bad_boolean_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let first = write(dir.path(), "a.ini", "[OPTIONS]\ndatetime_to_dhm = yes\n");
        let second = write(dir.path(), "b.ini", "[OPTIONS]\ndatetime_to_dhm = maybe\n");

        let config = ConfigStore::default().load(&[first, second]);

        assert_eq!(config.option("datetime_to_dhm"), Some(false));
    }

    #[test]
    fn test_written_layer_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plugin.ini");
        let store = ConfigStore::default();

        let mut config = ConfigSchema::timeline().defaults();
        config.options.insert("ignore_unspecific".into(), true);
        store.write(&path, &config).unwrap();

        assert_eq!(store.load(&[path]), config);
    }

    #[test]
    fn test_init_layer_seeds_defaults() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("project").join("plugin.ini");
        let store = ConfigStore::default();

        store.init_layer(&local).unwrap();

        let doc = IniDocument::read(&local).unwrap();
        assert_eq!(doc.get(SETTINGS_SECTION, "section_label"), Some("Section"));
        assert_eq!(doc.get(OPTIONS_SECTION, "ignore_unspecific"), Some("No"));
        assert_eq!(store.load(&[local]), ConfigSchema::timeline().defaults());
    }

    #[test]
    fn test_init_layer_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let local = write(dir.path(), "plugin.ini", "[SETTINGS]\nsection_label = Mine\n");

        let err = ConfigStore::default().init_layer(&local).unwrap_err();

        assert!(matches!(err, AppError::Config { .. }));
        assert_eq!(
            fs::read_to_string(&local).unwrap(),
            "[SETTINGS]\nsection_label = Mine\n"
        );
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("2"), None);
    }
}
