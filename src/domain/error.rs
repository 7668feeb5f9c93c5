//! Domain-level error types for timeline-sync.
//!
//! All errors are typed with `thiserror`. Recoverable conditions such as a
//! missing companion file or a malformed configuration layer never become
//! an `AppError`; they are absorbed where they occur and turned into status
//! text.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization failed.
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The converter rejected the timeline file or failed while converting.
    #[error("Conversion failed: {message}")]
    Converter {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The project is already locked for editing.
    #[error("Project is locked: {path}")]
    Lock { path: PathBuf },

    /// The default application could not be launched.
    #[error("Cannot open {path}: {message}")]
    Launch { path: PathBuf, message: String },
}

impl AppError {
    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create a JSON error.
    pub fn json(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a converter error without an underlying cause.
    pub fn converter(message: impl Into<String>) -> Self {
        Self::Converter {
            message: message.into(),
            source: None,
        }
    }

    /// Create a converter error wrapping the failure that caused it.
    pub fn converter_with_source(
        message: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Converter {
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
