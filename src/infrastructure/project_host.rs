//! Host model backed by a project file on disk.
//!
//! The command line has no in-memory document: the file on disk is the
//! project, so saving only confirms it is still there and refreshes its
//! timestamp.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{AppError, HostModel, Project, Result};

use super::edit_lock::EditLock;

/// File-backed project host.
#[derive(Debug)]
pub struct ProjectFileHost {
    path: PathBuf,
    project: Option<Project>,
}

impl ProjectFileHost {
    /// Open `path` as the current project. A missing file leaves the host
    /// without a project.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let project = Self::read_project(&path);
        if project.is_none() {
            tracing::debug!(path = %path.display(), "Project file not found");
        }
        Self { path, project }
    }

    fn read_project(path: &Path) -> Option<Project> {
        let metadata = fs::metadata(path).ok().filter(fs::Metadata::is_file)?;
        let last_saved = metadata.modified().ok().map(DateTime::<Utc>::from);
        Some(Project::new(path, last_saved))
    }

    /// The project must not be written while an external editor holds it.
    fn ensure_unlocked(&self) -> Result<()> {
        if EditLock::is_locked(&self.path) {
            return Err(AppError::Lock {
                path: EditLock::path_for(&self.path),
            });
        }
        Ok(())
    }
}

impl HostModel for ProjectFileHost {
    fn project(&self) -> Option<Project> {
        self.project.clone()
    }

    fn save_project(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        let project = Self::read_project(&self.path).ok_or_else(|| AppError::Config {
            message: format!("Project file disappeared: {}", self.path.display()),
        })?;
        tracing::debug!(path = %self.path.display(), "Project is up to date on disk");
        self.project = Some(project);
        Ok(())
    }

    fn reopen_project(&mut self, skip_save_prompt: bool) -> Result<()> {
        tracing::debug!(skip_save_prompt, "Reopening project");
        self.ensure_unlocked()?;
        self.project = Self::read_project(&self.path);
        if self.project.is_none() {
            return Err(AppError::Config {
                message: format!("Cannot reopen project: {}", self.path.display()),
            });
        }
        Ok(())
    }

    fn lock(&mut self) -> bool {
        match EditLock::acquire(&self.path) {
            Ok(lock) => {
                tracing::info!(lock = %lock.path().display(), "Project locked for editing");
                true
            }
            Err(AppError::Lock { path }) => {
                tracing::warn!(path = %path.display(), "Project is already locked");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot lock project");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::tests::{FakeConverter, FakeLauncher, FakeView};
    use crate::application::{Localizer, Outcome, SyncCommands};
    use tempfile::tempdir;

    #[test]
    fn test_open_existing_project() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.novx");
        fs::write(&path, "<novx/>").unwrap();

        let host = ProjectFileHost::open(&path);
        let project = host.project().unwrap();

        assert_eq!(project.file_path, path);
        assert!(project.last_saved.is_some());
    }

    #[test]
    fn test_open_missing_project() {
        let dir = tempdir().unwrap();
        let host = ProjectFileHost::open(dir.path().join("missing.novx"));
        assert!(host.project().is_none());
    }

    #[test]
    fn test_save_fails_when_file_removed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.novx");
        fs::write(&path, "<novx/>").unwrap();
        let mut host = ProjectFileHost::open(&path);

        assert!(host.save_project().is_ok());
        fs::remove_file(&path).unwrap();
        assert!(host.save_project().is_err());
        assert!(host.reopen_project(true).is_err());
    }

    #[test]
    fn test_lock_is_exclusive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.novx");
        fs::write(&path, "<novx/>").unwrap();
        let mut host = ProjectFileHost::open(&path);

        assert!(host.lock());
        assert!(!host.lock());
        assert!(EditLock::is_locked(&path));
    }

    #[test]
    fn test_locked_project_cannot_be_saved_or_reopened() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.novx");
        fs::write(&path, "<novx/>").unwrap();
        let mut host = ProjectFileHost::open(&path);

        assert!(host.lock());
        assert!(matches!(host.save_project(), Err(AppError::Lock { .. })));
        assert!(matches!(host.reopen_project(true), Err(AppError::Lock { .. })));

        EditLock::release(&path).unwrap();
        assert!(host.save_project().is_ok());
    }

    #[test]
    fn test_import_refused_while_timeline_is_being_edited() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.novx");
        fs::write(&path, "<novx/>").unwrap();
        fs::write(dir.path().join("draft.timeline"), "<timeline/>").unwrap();
        let view = FakeView {
            answer: true,
            ..Default::default()
        };
        let mut commands = SyncCommands::new(
            ProjectFileHost::open(&path),
            view,
            FakeConverter::default(),
            FakeLauncher::default(),
            Localizer::english(),
        )
        .with_user_config_dir(dir.path().join("user"));

        assert_eq!(commands.launch_editor().unwrap(), Outcome::Done);
        let err = commands.import_from_timeline().unwrap_err();

        assert!(matches!(err, AppError::Lock { .. }));
        assert!(commands.converter().imports.is_empty());
        assert!(commands.converter().exports.is_empty());
        assert!(commands.export_to_timeline().is_err());
        assert!(commands.converter().exports.is_empty());
    }
}
