//! Opens files and URLs with the desktop's default handlers.

use std::path::Path;

use crate::domain::{AppError, DocumentLauncher, Result};

/// Launcher using the operating system's file associations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl DocumentLauncher for SystemLauncher {
    fn open_document(&self, path: &Path) -> Result<()> {
        tracing::debug!(path = %path.display(), "Opening with default application");
        open::that(path).map_err(|e| AppError::Launch {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn open_url(&self, url: &str) -> Result<()> {
        tracing::debug!(url, "Opening in browser");
        open::that(url).map_err(|e| AppError::Launch {
            path: url.into(),
            message: e.to_string(),
        })
    }
}
