//! Message translation.
//!
//! Message ids are the English texts themselves. A catalog is a flat TOML
//! table mapping an id to its translation; placeholders are written `{0}`,
//! `{1}` and so on in both.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Translation context built once at startup and passed to whatever
/// produces user-facing text.
#[derive(Debug, Clone)]
pub struct Localizer {
    language: String,
    catalog: HashMap<String, String>,
}

impl Localizer {
    /// Built-in English messages.
    #[must_use]
    pub fn english() -> Self {
        Self {
            language: "en".into(),
            catalog: HashMap::new(),
        }
    }

    /// Load `<dir>/<language>.toml`, falling back to English when the
    /// catalog is missing or unreadable.
    #[must_use]
    pub fn load(dir: &Path, language: &str) -> Self {
        if language == "en" {
            return Self::english();
        }

        let path = dir.join(format!("{language}.toml"));
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No message catalog, using English");
                return Self::english();
            }
        };

        match toml::from_str::<HashMap<String, String>>(&content) {
            Ok(catalog) => {
                tracing::debug!(language, entries = catalog.len(), "Loaded message catalog");
                Self {
                    language: language.to_string(),
                    catalog,
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Malformed message catalog, using English");
                Self::english()
            }
        }
    }

    /// Two-letter language code from a locale string such as `de_DE.UTF-8`.
    /// The `C` and `POSIX` locales are English.
    #[must_use]
    pub fn language_from_locale(locale: &str) -> String {
        let name = locale.split(['_', '.', '@']).next().unwrap_or_default();
        if name.eq_ignore_ascii_case("C") || name.eq_ignore_ascii_case("POSIX") {
            return "en".into();
        }

        let code: String = name
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .take(2)
            .collect::<String>()
            .to_lowercase();

        if code.len() == 2 {
            code
        } else {
            "en".into()
        }
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translation of `msgid`, or `msgid` itself.
    #[must_use]
    pub fn tr<'a>(&'a self, msgid: &'a str) -> &'a str {
        self.catalog.get(msgid).map_or(msgid, String::as_str)
    }

    /// Translate `msgid` and substitute `{0}`, `{1}`, ... with `args`.
    #[must_use]
    pub fn tr_fmt(&self, msgid: &str, args: &[&str]) -> String {
        args.iter()
            .enumerate()
            .fold(self.tr(msgid).to_string(), |text, (i, arg)| {
                text.replace(&format!("{{{i}}}"), arg)
            })
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::english()
    }
}
