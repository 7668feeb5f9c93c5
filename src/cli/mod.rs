//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// Timeline Sync - keep a writing project and its Timeline file in step.
///
/// The timeline file sits next to the project with the `.timeline` extension.
#[derive(Parser, Debug)]
#[command(name = "timeline-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Project file to work on.
    #[arg(short, long)]
    pub project: PathBuf,

    /// Answer yes to every confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Output format: text or json.
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Message language (two-letter code); defaults to $LANG.
    #[arg(long)]
    pub lang: Option<String>,

    /// Directory holding `<lang>.toml` message catalogs.
    #[arg(long)]
    pub locale_dir: Option<PathBuf>,

    /// Converter program used for export and import.
    #[arg(
        long,
        env = "TIMELINE_CONVERTER",
        default_value = "timeline-converter"
    )]
    pub converter: String,

    /// Extra argument passed to the converter before the direction.
    #[arg(long = "converter-arg")]
    pub converter_args: Vec<String>,

    /// Whether the converter may replace an existing file: always, never or ask.
    #[arg(long, default_value = "always")]
    pub overwrite: String,

    /// Directory holding the user-wide plugin.ini; defaults to ~/.app-config.
    #[arg(long, env = "TIMELINE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show whether the timeline is newer or older than the project.
    Info,

    /// Save the project and create or update the timeline.
    Export,

    /// Save the project and update it from the timeline.
    Import,

    /// Lock the project and open the timeline in its default application.
    Edit,

    /// Remove the project's edit lock.
    Unlock,

    /// Show the effective configuration for the project.
    Config {
        /// Write a project-local configuration file with the current values.
        #[arg(long)]
        init: bool,
    },

    /// List the menu entries offered to a host.
    Menu,

    /// Open the online help.
    Docs,
}

/// How the converter treats an existing target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteMode {
    Always,
    Never,
    Ask,
}

impl std::str::FromStr for OverwriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "ask" => Ok(Self::Ask),
            _ => Err(format!("Unknown overwrite mode: {s}. Use 'always', 'never' or 'ask'")),
        }
    }
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }

    /// Parse the overwrite argument.
    pub fn overwrite_mode(&self) -> Result<OverwriteMode, String> {
        self.overwrite.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_with_yes() {
        let cli = Cli::parse_from(["timeline-sync", "-p", "draft.novx", "--yes", "export"]);
        assert!(cli.yes);
        assert_eq!(cli.project, PathBuf::from("draft.novx"));
        assert!(matches!(cli.command, Commands::Export));
    }

    #[test]
    fn test_parse_config_init_and_format() {
        let cli = Cli::parse_from(["timeline-sync", "-p", "a.novx", "-f", "json", "config", "--init"]);
        assert!(matches!(cli.command, Commands::Config { init: true }));
        assert_eq!(cli.output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_converter_args_repeat() {
        let cli = Cli::parse_from([
            "timeline-sync",
            "-p",
            "a.novx",
            "--converter",
            "python3",
            "--converter-arg",
            "tl.py",
            "--converter-arg",
            "fast",
            "import",
        ]);
        assert_eq!(cli.converter, "python3");
        assert_eq!(cli.converter_args, vec!["tl.py", "fast"]);
    }

    #[test]
    fn test_overwrite_mode() {
        let cli = Cli::parse_from(["timeline-sync", "-p", "a.novx", "export"]);
        assert_eq!(cli.overwrite_mode().unwrap(), OverwriteMode::Always);

        let cli = Cli::parse_from(["timeline-sync", "-p", "a.novx", "--overwrite", "Ask", "export"]);
        assert_eq!(cli.overwrite_mode().unwrap(), OverwriteMode::Ask);

        let cli = Cli::parse_from(["timeline-sync", "-p", "a.novx", "--overwrite", "maybe", "export"]);
        assert!(cli.overwrite_mode().is_err());
    }

    #[test]
    fn test_config_dir_flag() {
        let cli = Cli::parse_from(["timeline-sync", "-p", "a.novx", "--config-dir", "/etc/tl", "config"]);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/etc/tl")));
    }
}
