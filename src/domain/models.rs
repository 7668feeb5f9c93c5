//! Domain models shared by the sync commands and their host adapters.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::settings::EffectiveConfiguration;

/// Extension of the companion timeline file.
pub const TIMELINE_EXTENSION: &str = "timeline";

/// The project currently open in the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Path of the project file on disk.
    pub file_path: PathBuf,
    /// When the project was last written to disk, if ever.
    pub last_saved: Option<DateTime<Utc>>,
}

impl Project {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>, last_saved: Option<DateTime<Utc>>) -> Self {
        Self {
            file_path: file_path.into(),
            last_saved,
        }
    }
}

/// How the companion file's modification time relates to the project's
/// last save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// The companion file was modified after the project was saved.
    Newer,
    /// The companion file is as old as or older than the project.
    Older,
    /// One of the two timestamps could not be read.
    Undetermined,
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Newer => write!(f, "newer"),
            Self::Older => write!(f, "older"),
            Self::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// Handle on a timeline file, built with the configuration that applies to
/// one conversion.
#[derive(Debug, Clone)]
pub struct TimelineFile {
    pub path: PathBuf,
    pub configuration: EffectiveConfiguration,
}

impl TimelineFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, configuration: EffectiveConfiguration) -> Self {
        Self {
            path: path.into(),
            configuration,
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Status text to show to the user.
    pub message: String,
}

impl ConversionReport {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
