//! Application layer - use cases and orchestration.
//!
//! This layer resolves companion files, merges configuration layers and
//! runs the sync commands against the host traits.

pub mod commands;
pub mod config_store;
pub mod formatter;
pub mod localizer;
pub mod menu;
pub mod path_resolver;

pub use commands::{Outcome, SyncCommands};
pub use formatter::{
    format_configuration_json, format_configuration_table, format_status_json,
    ConfigurationReport, LayerInfo, OutputFormat,
};
pub use localizer::Localizer;
pub use menu::{Menu, MenuCommand, MenuEntry};
