//! Domain layer - core types and host boundary traits.
//!
//! This layer contains pure domain models, the configuration schema and
//! error types without any external dependencies (filesystem, processes).

pub mod error;
pub mod host;
pub mod models;
pub mod settings;

pub use error::{AppError, Result};
pub use host::{Converter, DocumentLauncher, HostModel, HostView, OverwritePolicy};
pub use models::{ConversionReport, Freshness, Project, TimelineFile, TIMELINE_EXTENSION};
pub use settings::{ConfigSchema, EffectiveConfiguration, OPTIONS_SECTION, SETTINGS_SECTION};
