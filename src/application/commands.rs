//! The user-facing sync commands.
//!
//! Each command is a short, linear flow: check there is a project, work out
//! the companion file, ask before touching anything, save, then hand over to
//! the converter. Converter errors are returned unchanged, and always after
//! the project has been saved.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::{
    Converter, DocumentLauncher, EffectiveConfiguration, Freshness, HostModel, HostView,
    Project, Result, TimelineFile,
};
use crate::infrastructure::{layer_paths_in, user_config_dir, INI_FILENAME};

use super::config_store::ConfigStore;
use super::localizer::Localizer;
use super::path_resolver::{companion_path, compare_freshness, exists, modification_time};

/// Name of the external application as shown to the user.
pub const APPLICATION: &str = "Timeline";

/// Title of information boxes.
pub const PLUGIN_TITLE: &str = concat!("Timeline plugin v", env!("CARGO_PKG_VERSION"));

/// Online documentation.
pub const HELP_URL: &str = "https://peter88213.github.io/nv_timeline/usage";

/// How a command ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No project is open; nothing was done.
    NoProject,
    /// The user declined, or the host refused the edit lock.
    Cancelled,
    /// There is no companion file to work with.
    Unavailable,
    Done,
}

/// Snapshot of the companion file relative to the open project.
#[derive(Debug, Clone, Serialize)]
pub struct CompanionStatus {
    pub project: PathBuf,
    pub timeline: PathBuf,
    pub exists: bool,
    pub modified: Option<DateTime<Local>>,
    pub freshness: Freshness,
}

/// Sync commands bound to a host, a converter and a document launcher.
pub struct SyncCommands<M, V, C, L> {
    model: M,
    view: V,
    converter: C,
    launcher: L,
    config_store: ConfigStore,
    user_config_dir: PathBuf,
    l10n: Localizer,
}

impl<M, V, C, L> SyncCommands<M, V, C, L>
where
    M: HostModel,
    V: HostView,
    C: Converter,
    L: DocumentLauncher,
{
    /// Create the commands with the default schema and the user's home
    /// configuration directory.
    pub fn new(model: M, view: V, converter: C, launcher: L, l10n: Localizer) -> Self {
        Self {
            model,
            view,
            converter,
            launcher,
            config_store: ConfigStore::default(),
            user_config_dir: user_config_dir(),
            l10n,
        }
    }

    /// Read the user-wide layer from `dir` instead of the home directory.
    #[must_use]
    pub fn with_user_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_config_dir = dir.into();
        self
    }

    #[cfg(test)]
    pub const fn model(&self) -> &M {
        &self.model
    }

    #[cfg(test)]
    pub const fn view(&self) -> &V {
        &self.view
    }

    #[cfg(test)]
    pub const fn converter(&self) -> &C {
        &self.converter
    }

    #[cfg(test)]
    pub const fn launcher(&self) -> &L {
        &self.launcher
    }

    pub const fn localizer(&self) -> &Localizer {
        &self.l10n
    }

    /// Configuration layers that apply to `source_path`, lowest precedence
    /// first.
    #[must_use]
    pub fn layer_paths(&self, source_path: &Path) -> Vec<PathBuf> {
        layer_paths_in(&self.user_config_dir, source_path)
    }

    /// Merged configuration for `source_path`.
    #[must_use]
    pub fn effective_configuration(&self, source_path: &Path) -> EffectiveConfiguration {
        self.config_store.load(&self.layer_paths(source_path))
    }

    /// Seed the project-local layer for `source_path` with the schema
    /// defaults and return its path.
    ///
    /// # Errors
    /// Returns error if the layer already exists or cannot be written.
    pub fn init_project_layer(&self, source_path: &Path) -> Result<PathBuf> {
        let local = layer_paths_in(&self.user_config_dir, source_path)
            .pop()
            .unwrap_or_else(|| source_path.with_file_name(INI_FILENAME));
        self.config_store.init_layer(&local)?;
        Ok(local)
    }

    /// State of the companion file, `None` without an open project.
    #[must_use]
    pub fn companion_status(&self) -> Option<CompanionStatus> {
        let project = self.model.project()?;
        let timeline = companion_path(&project.file_path);
        let present = exists(&timeline);

        let (modified, freshness) = if present {
            (
                modification_time(&timeline),
                compare_freshness(&timeline, project.last_saved),
            )
        } else {
            (None, Freshness::Undetermined)
        };

        Some(CompanionStatus {
            project: project.file_path,
            timeline,
            exists: present,
            modified,
            freshness,
        })
    }

    /// Create or update the timeline from the project.
    ///
    /// # Errors
    /// Returns error if saving fails or the converter fails.
    pub fn export_to_timeline(&mut self) -> Result<Outcome> {
        let Some(project) = self.model.project() else {
            return Ok(Outcome::NoProject);
        };
        let timeline = companion_path(&project.file_path);

        let action = if exists(&timeline) {
            self.l10n.tr("update")
        } else {
            self.l10n.tr("create")
        };
        let question = self
            .l10n
            .tr_fmt("Save the project and {0} the timeline?", &[action]);
        if !self.view.ask_yes_no(&question) {
            tracing::debug!("Export cancelled by user");
            return Ok(Outcome::Cancelled);
        }

        let project = self.save(project)?;
        let target = TimelineFile::new(
            timeline,
            self.effective_configuration(&project.file_path),
        );

        let report = self.converter.export_from_host(&project, &target)?;
        tracing::info!(timeline = %target.path.display(), "Timeline exported");
        self.view.set_status(&report.message);

        Ok(Outcome::Done)
    }

    /// Update the project from the timeline.
    ///
    /// # Errors
    /// Returns error if saving, converting or reopening fails.
    pub fn import_from_timeline(&mut self) -> Result<Outcome> {
        let Some(project) = self.model.project() else {
            return Ok(Outcome::NoProject);
        };
        let timeline = companion_path(&project.file_path);

        if !exists(&timeline) {
            self.report_unavailable();
            return Ok(Outcome::Unavailable);
        }

        let question = self.l10n.tr("Save the project and update it?").to_string();
        if !self.view.ask_yes_no(&question) {
            tracing::debug!("Import cancelled by user");
            return Ok(Outcome::Cancelled);
        }

        let project = self.save(project)?;
        let source = TimelineFile::new(
            timeline,
            self.effective_configuration(&project.file_path),
        );

        let report = self.converter.import_to_host(&source, &project)?;
        tracing::info!(project = %project.file_path.display(), "Project updated from timeline");

        self.model.reopen_project(true)?;
        self.view.set_status(&report.message);

        Ok(Outcome::Done)
    }

    /// Show how the companion file relates to the project.
    pub fn show_info(&mut self) -> Outcome {
        let Some(status) = self.companion_status() else {
            return Outcome::NoProject;
        };

        let message = if !status.exists {
            self.l10n
                .tr_fmt("No {0} file available for this project.", &[APPLICATION])
        } else {
            match (status.freshness, status.modified) {
                (Freshness::Newer | Freshness::Older, Some(modified)) => {
                    let comparison = if status.freshness == Freshness::Newer {
                        self.l10n.tr("newer")
                    } else {
                        self.l10n.tr("older")
                    };
                    let date = modified.format("%Y-%m-%d %H:%M:%S").to_string();
                    self.l10n.tr_fmt(
                        "{0} file is {1} than the project.\n (last saved on {2})",
                        &[APPLICATION, comparison, date.as_str()],
                    )
                }
                _ => self.l10n.tr("Cannot determine file date.").to_string(),
            }
        };

        self.view.show_info(PLUGIN_TITLE, &message);
        Outcome::Done
    }

    /// Lock the project and open the timeline in its default application.
    ///
    /// # Errors
    /// Returns error if the application cannot be launched.
    pub fn launch_editor(&mut self) -> Result<Outcome> {
        let Some(project) = self.model.project() else {
            return Ok(Outcome::NoProject);
        };
        let timeline = companion_path(&project.file_path);

        if !exists(&timeline) {
            self.report_unavailable();
            return Ok(Outcome::Unavailable);
        }

        if !self.model.lock() {
            tracing::debug!("Host refused the edit lock");
            return Ok(Outcome::Cancelled);
        }

        self.launcher.open_document(&timeline)?;
        tracing::info!(timeline = %timeline.display(), "Launched timeline editor");
        Ok(Outcome::Done)
    }

    /// Open the online help.
    ///
    /// # Errors
    /// Returns error if no browser can be started.
    pub fn open_help(&self) -> Result<()> {
        self.launcher.open_url(HELP_URL)
    }

    fn save(&mut self, project: Project) -> Result<Project> {
        self.model.save_project()?;
        Ok(self.model.project().unwrap_or(project))
    }

    fn report_unavailable(&mut self) {
        let message = self
            .l10n
            .tr_fmt("!No {0} file available for this project.", &[APPLICATION]);
        self.view.set_status(&message);
    }
}
