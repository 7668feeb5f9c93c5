//! Boundary traits between the sync commands and the outside world.
//!
//! The commands never touch a GUI, a process or the converter's file format
//! directly. A host adapter implements [`HostModel`] and [`HostView`]; the
//! conversion itself sits behind [`Converter`].

use std::fmt;
use std::path::Path;

use super::error::Result;
use super::models::{ConversionReport, Project, TimelineFile};

/// The host's document model.
pub trait HostModel {
    /// The currently open project, if any.
    fn project(&self) -> Option<Project>;

    /// Write the open project to disk.
    ///
    /// # Errors
    /// Returns error if the project cannot be written.
    fn save_project(&mut self) -> Result<()>;

    /// Reload the open project from disk. With `skip_save_prompt` the host
    /// must not ask whether to save first.
    ///
    /// # Errors
    /// Returns error if the project cannot be read back.
    fn reopen_project(&mut self, skip_save_prompt: bool) -> Result<()>;

    /// Lock the project against editing in the host. Returns whether the
    /// lock is held afterwards.
    fn lock(&mut self) -> bool;
}

/// The host's user-facing surface.
pub trait HostView {
    /// Ask a yes/no question; `true` means the user agreed.
    fn ask_yes_no(&mut self, question: &str) -> bool;

    /// Show a one-line status. A leading `!` marks an error.
    fn set_status(&mut self, message: &str);

    /// Show a modal information box.
    fn show_info(&mut self, title: &str, message: &str);
}

/// Converts between the host project and a timeline file.
pub trait Converter {
    /// Create or update `target` from `project`.
    ///
    /// # Errors
    /// Returns error on I/O failure or if the timeline file is malformed.
    fn export_from_host(
        &mut self,
        project: &Project,
        target: &TimelineFile,
    ) -> Result<ConversionReport>;

    /// Update `project` from `source`.
    ///
    /// # Errors
    /// Returns error on I/O failure or if the timeline file is malformed.
    fn import_to_host(
        &mut self,
        source: &TimelineFile,
        project: &Project,
    ) -> Result<ConversionReport>;
}

/// Opens a file with the application the OS associates with it.
pub trait DocumentLauncher {
    /// # Errors
    /// Returns error if no application could be started.
    fn open_document(&self, path: &Path) -> Result<()>;

    /// Open a web page in the default browser.
    ///
    /// # Errors
    /// Returns error if no browser could be started.
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Decides whether a converter may overwrite an existing target file.
pub struct OverwritePolicy {
    confirm: Box<dyn Fn(&Path) -> bool>,
}

impl OverwritePolicy {
    /// Overwrite without asking.
    #[must_use]
    pub fn always() -> Self {
        Self::from_fn(|_| true)
    }

    /// Never overwrite an existing file.
    #[must_use]
    pub fn never() -> Self {
        Self::from_fn(|_| false)
    }

    pub fn from_fn(confirm: impl Fn(&Path) -> bool + 'static) -> Self {
        Self {
            confirm: Box::new(confirm),
        }
    }

    #[must_use]
    pub fn confirm_overwrite(&self, path: &Path) -> bool {
        (self.confirm)(path)
    }
}

impl Default for OverwritePolicy {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for OverwritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverwritePolicy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_overwrites() {
        let policy = OverwritePolicy::default();
        assert!(policy.confirm_overwrite(Path::new("draft.timeline")));
    }

    #[test]
    fn test_custom_policy() {
        let policy = OverwritePolicy::from_fn(|p| p.extension().is_some_and(|e| e == "timeline"));
        assert!(policy.confirm_overwrite(Path::new("draft.timeline")));
        assert!(!policy.confirm_overwrite(Path::new("draft.novx")));
        assert!(!OverwritePolicy::never().confirm_overwrite(Path::new("draft.timeline")));
    }
}
