//! Companion file naming and freshness checks.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};

use crate::domain::{Freshness, TIMELINE_EXTENSION};

/// Path of the timeline file paired with `project_path`.
///
/// Replaces the extension (or appends one if there is none). Does not touch
/// the filesystem.
#[must_use]
pub fn companion_path(project_path: &Path) -> PathBuf {
    project_path.with_extension(TIMELINE_EXTENSION)
}

/// Whether `path` names an existing regular file.
#[must_use]
pub fn exists(path: &Path) -> bool {
    path.is_file()
}

/// Modification time of `path`, `None` if it cannot be read.
#[must_use]
pub fn modification_time(path: &Path) -> Option<DateTime<Local>> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => Some(DateTime::<Local>::from(modified)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Cannot read modification time");
            None
        }
    }
}

/// Compare the companion file's modification time with the project's last
/// save. Never fails; unreadable timestamps give [`Freshness::Undetermined`].
#[must_use]
pub fn compare_freshness(companion: &Path, project_saved: Option<DateTime<Utc>>) -> Freshness {
    match (modification_time(companion), project_saved) {
        (Some(modified), Some(saved)) => freshness_of(modified.with_timezone(&Utc), saved),
        _ => Freshness::Undetermined,
    }
}

fn freshness_of(modified: DateTime<Utc>, saved: DateTime<Utc>) -> Freshness {
    if modified > saved {
        Freshness::Newer
    } else {
        Freshness::Older
    }
}
