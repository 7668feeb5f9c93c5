//! Project edit lock.
//!
//! A lock file next to the project tells the host that an external editor
//! may be working on the companion file. The lock outlives this process and
//! is removed explicitly with [`EditLock::release`].

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::domain::{AppError, Result};

/// Exclusive lock on a project file.
#[derive(Debug)]
pub struct EditLock {
    path: PathBuf,
}

impl EditLock {
    /// Lock file belonging to `project_path`.
    #[must_use]
    pub fn path_for(project_path: &Path) -> PathBuf {
        project_path.with_extension("lock")
    }

    /// Create the lock file. Fails if another holder already created it.
    ///
    /// # Errors
    /// Returns `AppError::Lock` if the project is already locked, or an IO
    /// error if the lock file cannot be written.
    pub fn acquire(project_path: &Path) -> Result<Self> {
        let path = Self::path_for(project_path);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(AppError::Lock { path });
            }
            Err(e) => return Err(AppError::io("Failed to create lock file", e)),
        };

        writeln!(file, "pid={}", std::process::id())
            .and_then(|()| writeln!(file, "locked_at={}", Utc::now().to_rfc3339()))
            .map_err(|e| AppError::io("Failed to write lock file", e))?;

        tracing::debug!(path = %path.display(), "Project locked");
        Ok(Self { path })
    }

    #[must_use]
    pub fn is_locked(project_path: &Path) -> bool {
        Self::path_for(project_path).is_file()
    }

    /// Remove the lock file. Returns whether a lock was present.
    ///
    /// # Errors
    /// Returns error if the lock file exists but cannot be removed.
    pub fn release(project_path: &Path) -> Result<bool> {
        let path = Self::path_for(project_path);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Project unlocked");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::io("Failed to remove lock file", e)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_acquire_creates_lock_file() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("draft.novx");

        let lock = EditLock::acquire(&project).unwrap();

        assert_eq!(lock.path(), dir.path().join("draft.lock"));
        assert!(EditLock::is_locked(&project));
        let content = fs::read_to_string(lock.path()).unwrap();
        assert!(content.starts_with("pid="));
    }

    #[test]
    fn test_second_acquire_fails() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("draft.novx");

        let _lock = EditLock::acquire(&project).unwrap();
        let err = EditLock::acquire(&project).unwrap_err();

        assert!(matches!(err, AppError::Lock { .. }));
    }

    #[test]
    fn test_release() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("draft.novx");

        assert!(!EditLock::release(&project).unwrap());
        let _lock = EditLock::acquire(&project).unwrap();
        assert!(EditLock::release(&project).unwrap());
        assert!(!EditLock::is_locked(&project));
        assert!(EditLock::acquire(&project).is_ok());
    }
}
