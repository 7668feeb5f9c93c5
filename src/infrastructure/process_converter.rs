//! Converter that runs an external conversion program.
//!
//! The program is called as
//! `<program> [leading args] export|import --project P --timeline T`
//! followed by `--overwrite` when the target may be replaced, and one
//! `--setting key=value` / `--option key=true|false` per configuration
//! entry. Exit status 0 is success and the last non-empty line on stdout
//! becomes the status message.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::domain::{
    AppError, ConversionReport, Converter, OverwritePolicy, Project, Result, TimelineFile,
};

const DEFAULT_REPORT: &str = "Conversion complete.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Export,
    Import,
}

impl Direction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Export => "export",
            Self::Import => "import",
        }
    }
}

/// Runs an external converter as a child process.
#[derive(Debug)]
pub struct ProcessConverter {
    program: OsString,
    leading_args: Vec<OsString>,
    overwrite: OverwritePolicy,
}

impl ProcessConverter {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            overwrite: OverwritePolicy::always(),
        }
    }

    /// Arguments placed before the direction, e.g. a script path.
    #[must_use]
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    fn build_args(
        &self,
        direction: Direction,
        project: &Project,
        timeline: &TimelineFile,
        overwrite: bool,
    ) -> Vec<OsString> {
        let mut args = self.leading_args.clone();
        args.push(direction.as_str().into());
        args.push("--project".into());
        args.push(project.file_path.clone().into_os_string());
        args.push("--timeline".into());
        args.push(timeline.path.clone().into_os_string());
        if overwrite {
            args.push("--overwrite".into());
        }

        let config = &timeline.configuration;
        for (key, value) in &config.settings {
            args.push("--setting".into());
            args.push(format!("{key}={value}").into());
        }
        for (key, value) in &config.options {
            args.push("--option".into());
            args.push(format!("{key}={value}").into());
        }

        args
    }

    /// Ask the overwrite policy about an existing target. Returns whether
    /// `--overwrite` must be passed.
    fn check_overwrite(&self, target: &Path) -> Result<bool> {
        if !target.exists() {
            return Ok(false);
        }
        if self.overwrite.confirm_overwrite(target) {
            Ok(true)
        } else {
            Err(AppError::converter(format!(
                "Action canceled: {} would be overwritten",
                target.display()
            )))
        }
    }

    fn run(
        &self,
        direction: Direction,
        project: &Project,
        timeline: &TimelineFile,
        target: &Path,
    ) -> Result<ConversionReport> {
        let overwrite = self.check_overwrite(target)?;
        let args = self.build_args(direction, project, timeline, overwrite);

        tracing::debug!(program = ?self.program, ?args, "Running converter");
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| {
                let message = if e.kind() == io::ErrorKind::NotFound {
                    format!("Converter program not found: {}", self.program.to_string_lossy())
                } else {
                    format!("Cannot run converter {}", self.program.to_string_lossy())
                };
                AppError::converter_with_source(message, e)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            return Err(AppError::converter(if message.is_empty() {
                format!("Converter exited with {}", output.status)
            } else {
                message.to_string()
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = stdout
            .lines()
            .map(str::trim)
            .rev()
            .find(|line| !line.is_empty())
            .unwrap_or(DEFAULT_REPORT);

        Ok(ConversionReport::new(message))
    }
}

impl Converter for ProcessConverter {
    fn export_from_host(
        &mut self,
        project: &Project,
        target: &TimelineFile,
    ) -> Result<ConversionReport> {
        self.run(Direction::Export, project, target, &target.path)
    }

    fn import_to_host(
        &mut self,
        source: &TimelineFile,
        project: &Project,
    ) -> Result<ConversionReport> {
        self.run(Direction::Import, project, source, &project.file_path)
    }
}
