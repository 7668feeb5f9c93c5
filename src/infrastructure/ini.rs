//! Minimal INI reader and writer for configuration layers.
//!
//! Supports `[section]` headers, `key = value` or `key: value` pairs and
//! full-line comments starting with `#` or `;`. A line indented deeper than
//! the key before it continues that key's value on a new line. Keys are
//! case-insensitive and stored lowercase; section names keep their case.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::domain::{AppError, Result};

/// Parsed INI file: section name to key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniDocument {
    /// Parse INI text.
    ///
    /// # Errors
    /// Returns error on a key outside any section, a broken section header,
    /// a line that is neither, or a section declared twice.
    pub fn parse(text: &str) -> Result<Self> {
        let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        let mut current: Option<String> = None;
        // Key of the last pair and the indentation of its line.
        let mut last_key: Option<(String, usize)> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let indent = raw.len() - raw.trim_start().len();
            if let (Some(section), Some((key, key_indent))) = (current.as_ref(), last_key.as_ref()) {
                if indent > *key_indent {
                    if let Some(value) = sections.get_mut(section).and_then(|s| s.get_mut(key)) {
                        value.push('\n');
                        value.push_str(line);
                    }
                    continue;
                }
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| parse_error(line_no, "malformed section header"))?;
                if sections.contains_key(name) {
                    return Err(parse_error(line_no, &format!("duplicate section [{name}]")));
                }
                sections.insert(name.to_string(), BTreeMap::new());
                current = Some(name.to_string());
                last_key = None;
                continue;
            }

            let Some(section) = current.as_ref() else {
                return Err(parse_error(line_no, "key outside of any section"));
            };

            let split_at = line
                .find(['=', ':'])
                .ok_or_else(|| parse_error(line_no, "expected `key = value`"))?;
            let key = line[..split_at].trim().to_lowercase();
            if key.is_empty() {
                return Err(parse_error(line_no, "empty key"));
            }
            let value = line[split_at + 1..].trim().to_string();

            if let Some(entries) = sections.get_mut(section) {
                entries.insert(key.clone(), value);
            }
            last_key = Some((key, indent));
        }

        Ok(Self { sections })
    }

    /// Read and parse an INI file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| AppError::io(format!("Failed to read {}", path.display()), e))?;
        Self::parse(&text).map_err(|e| AppError::Config {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Key/value pairs of a section, if present.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(name)
    }

    #[cfg(test)]
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(&key.to_lowercase()))
            .map(String::as_str)
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_lowercase(), value.into());
    }

    /// Render as INI text, sections in name order.
    #[must_use]
    pub fn to_ini_string(&self) -> String {
        let mut out = String::new();
        for (name, entries) in &self.sections {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "[{name}]");
            for (key, value) in entries {
                let _ = writeln!(out, "{key} = {value}");
            }
        }
        out
    }

    /// Write the document to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create config directory", e))?;
        }
        fs::write(path, self.to_ini_string())
            .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))
    }
}

fn parse_error(line: usize, message: &str) -> AppError {
    AppError::Config {
        message: format!("line {line}: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_sections_and_pairs() {
        let doc = IniDocument::parse(
            "# comment\n[SETTINGS]\nsection_label = Chapter\nSection_Color: 1,2,3\n\n[OPTIONS]\n; another\nignore_unspecific = Yes\n",
        )
        .unwrap();

        assert_eq!(doc.get("SETTINGS", "section_label"), Some("Chapter"));
        assert_eq!(doc.get("SETTINGS", "section_color"), Some("1,2,3"));
        assert_eq!(doc.get("OPTIONS", "ignore_unspecific"), Some("Yes"));
        assert_eq!(doc.get("OPTIONS", "missing"), None);
    }

    #[test]
    fn test_value_may_contain_delimiters() {
        let doc = IniDocument::parse("[SETTINGS]\nsection_label = a=b:c\n").unwrap();
        assert_eq!(doc.get("SETTINGS", "section_label"), Some("a=b:c"));
    }

    #[test]
    fn test_indented_line_continues_value() {
        let doc = IniDocument::parse(
            "[SETTINGS]\nsection_label = Part one\n    and part two\n\tthree\nsection_color = 1,2,3\n",
        )
        .unwrap();

        assert_eq!(
            doc.get("SETTINGS", "section_label"),
            Some("Part one\nand part two\nthree")
        );
        assert_eq!(doc.get("SETTINGS", "section_color"), Some("1,2,3"));
    }

    #[test]
    fn test_indented_pairs_at_same_level_stay_separate() {
        let doc = IniDocument::parse("[SETTINGS]\n  section_label = A\n  section_color = 1,2,3\n").unwrap();

        assert_eq!(doc.get("SETTINGS", "section_label"), Some("A"));
        assert_eq!(doc.get("SETTINGS", "section_color"), Some("1,2,3"));
    }

    #[test]
    fn test_rejects_key_outside_section() {
        assert!(IniDocument::parse("section_label = x\n").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(IniDocument::parse("[SETTINGS\nfoo = bar\n").is_err());
        assert!(IniDocument::parse("[SETTINGS]\nthis is not a pair\n").is_err());
        assert!(IniDocument::parse("[A]\n[A]\n").is_err());
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("plugin.ini");

        let mut doc = IniDocument::default();
        doc.set("SETTINGS", "section_label", "Scene");
        doc.set("OPTIONS", "dhm_to_datetime", "Yes");
        doc.write(&path).unwrap();

        assert_eq!(IniDocument::read(&path).unwrap(), doc);
    }
}
