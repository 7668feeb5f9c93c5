//! Configuration layer discovery.
//!
//! Settings are read from a user-wide file below the home directory and then
//! from a file next to the project, so project-local values win.

use std::path::{Path, PathBuf};

/// Directory below the user's home holding the shared configuration.
pub const USER_CONFIG_DIR: &str = ".app-config";

/// File name of every configuration layer.
pub const INI_FILENAME: &str = "plugin.ini";

/// Directory for the user-wide layer. Falls back to the current directory
/// when the home directory cannot be determined.
#[must_use]
pub fn user_config_dir() -> PathBuf {
    dirs::home_dir().map_or_else(
        || {
            tracing::debug!("Home directory unknown, using current directory for user config");
            PathBuf::from(".")
        },
        |home| home.join(USER_CONFIG_DIR),
    )
}

/// Ordered configuration layers for a project or companion file, lowest
/// precedence first.
#[must_use]
pub fn layer_paths_in(user_dir: &Path, source_path: &Path) -> Vec<PathBuf> {
    let source_dir = match source_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    vec![user_dir.join(INI_FILENAME), source_dir.join(INI_FILENAME)]
}
