//! Output formatting for the command line.
//!
//! Supports a human-readable text view and JSON for scripting.

use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::domain::{EffectiveConfiguration, OPTIONS_SECTION, SETTINGS_SECTION};

use super::commands::CompanionStatus;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: text, json")),
        }
    }
}

/// Configuration layers together with the merged result.
#[derive(Debug, Serialize)]
pub struct ConfigurationReport<'a> {
    pub layers: Vec<LayerInfo>,
    pub effective: &'a EffectiveConfiguration,
}

/// One configuration layer and whether it was found.
#[derive(Debug, Serialize)]
pub struct LayerInfo {
    pub path: PathBuf,
    pub present: bool,
}

/// Formats the effective configuration as a table with the layer list.
#[must_use]
pub fn format_configuration_table(report: &ConfigurationReport<'_>) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Configuration layers".bold()));
    for (i, layer) in report.layers.iter().enumerate() {
        let state = if layer.present {
            "found".green()
        } else {
            "missing".dimmed()
        };
        out.push_str(&format!("  {}. [{}] {}\n", i + 1, state, layer.path.display()));
    }
    out.push('\n');

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Section", "Key", "Value"]);

    for (key, value) in &report.effective.settings {
        table.add_row(vec![SETTINGS_SECTION, key.as_str(), value.as_str()]);
    }
    for (key, value) in &report.effective.options {
        let value = if *value { "Yes" } else { "No" };
        table.add_row(vec![OPTIONS_SECTION, key.as_str(), value]);
    }

    out.push_str(&table.to_string());
    out
}

/// Formats the configuration report as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_configuration_json(
    report: &ConfigurationReport<'_>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Formats the companion file status as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_status_json(status: &CompanionStatus) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(status)
}
