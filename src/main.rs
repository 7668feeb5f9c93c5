//! Timeline Sync - keep a writing project and its Timeline file in step.
//!
//! The timeline file lives next to the project and shares its name, with the
//! `.timeline` extension. Conversion is done by an external converter
//! program; this tool decides which file pairs with which project, which
//! settings apply, and asks before anything is written.
//!
//!   timeline-sync -p novel.novx info      # Which file is newer?
//!   timeline-sync -p novel.novx export    # Save and create/update the timeline
//!   timeline-sync -p novel.novx import    # Save and update the project
//!   timeline-sync -p novel.novx edit      # Lock the project, open the timeline
//!   timeline-sync -p novel.novx config    # Show the effective settings

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    format_configuration_json, format_configuration_table, format_status_json,
    ConfigurationReport, LayerInfo, Localizer, Menu, MenuCommand, MenuEntry, Outcome,
    OutputFormat, SyncCommands,
};
use cli::{Cli, Commands, OverwriteMode};
use domain::{AppError, HostModel, OverwritePolicy};
use infrastructure::{EditLock, ProcessConverter, ProjectFileHost, SystemLauncher, TerminalView};

type CliCommands = SyncCommands<ProjectFileHost, TerminalView, ProcessConverter, SystemLauncher>;

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|e| AppError::Config { message: e })?;
    let overwrite = cli
        .overwrite_mode()
        .map_err(|e| AppError::Config { message: e })?;

    let l10n = build_localizer(cli.lang.as_deref(), cli.locale_dir.as_deref());
    tracing::debug!(language = l10n.language(), "Message catalog selected");

    let host = ProjectFileHost::open(&cli.project);
    let mut menu = Menu::new();
    menu.set_enabled(host.project().is_some());

    let view = TerminalView::new(cli.yes);
    let policy = match overwrite {
        OverwriteMode::Always => OverwritePolicy::always(),
        OverwriteMode::Never => OverwritePolicy::never(),
        OverwriteMode::Ask => view.overwrite_prompt(),
    };
    let converter = ProcessConverter::new(&cli.converter)
        .with_leading_args(cli.converter_args.clone())
        .with_overwrite_policy(policy);

    let mut commands = SyncCommands::new(host, view, converter, SystemLauncher, l10n);
    if let Some(dir) = &cli.config_dir {
        commands = commands.with_user_config_dir(dir);
    }

    let outcome = match cli.command {
        Commands::Info if format == OutputFormat::Json => cmd_status_json(&commands)?,
        Commands::Info => menu.dispatch(&mut commands, MenuCommand::Info)?,
        Commands::Export => menu.dispatch(&mut commands, MenuCommand::Export)?,
        Commands::Import => menu.dispatch(&mut commands, MenuCommand::Import)?,
        Commands::Edit => menu.dispatch(&mut commands, MenuCommand::EditTimeline)?,
        Commands::Docs => menu.dispatch(&mut commands, MenuCommand::Help)?,
        Commands::Unlock => cmd_unlock(&cli.project)?,
        Commands::Config { init } => cmd_config(&commands, &cli.project, init, format)?,
        Commands::Menu => cmd_menu(&menu, commands.localizer()),
    };

    match outcome {
        Outcome::NoProject => Err(AppError::Config {
            message: format!("Project file not found: {}", cli.project.display()),
        }),
        Outcome::Cancelled => {
            println!("{}", "Nothing changed.".dimmed());
            Ok(())
        }
        Outcome::Unavailable | Outcome::Done => Ok(()),
    }
}

/// Print the companion file status as JSON.
fn cmd_status_json(commands: &CliCommands) -> domain::Result<Outcome> {
    let Some(status) = commands.companion_status() else {
        return Ok(Outcome::NoProject);
    };

    println!("{}", format_status_json(&status).map_err(AppError::json)?);
    Ok(Outcome::Done)
}

/// Remove the edit lock left by `edit`.
fn cmd_unlock(project: &Path) -> domain::Result<Outcome> {
    if EditLock::release(project)? {
        println!("{} Unlocked {}", "✓".green().bold(), project.display());
    } else {
        println!("{}", "Project was not locked.".dimmed());
    }
    Ok(Outcome::Done)
}

/// Show the configuration layers and the merged result.
fn cmd_config(
    commands: &CliCommands,
    project: &Path,
    init: bool,
    format: OutputFormat,
) -> domain::Result<Outcome> {
    let layers = commands.layer_paths(project);

    if init {
        let local = commands.init_project_layer(project)?;
        println!("{} Wrote {}", "✓".green().bold(), local.display());
    }

    let effective = commands.effective_configuration(project);
    let report = ConfigurationReport {
        layers: layers
            .into_iter()
            .map(|path| LayerInfo {
                present: path.is_file(),
                path,
            })
            .collect(),
        effective: &effective,
    };

    let output = match format {
        OutputFormat::Text => format_configuration_table(&report),
        OutputFormat::Json => format_configuration_json(&report).map_err(AppError::json)?,
    };
    println!("{output}");

    Ok(Outcome::Done)
}

/// Print the menu a host would show.
fn cmd_menu(menu: &Menu, l10n: &Localizer) -> Outcome {
    let state = if menu.is_enabled() {
        "enabled".green()
    } else {
        "disabled (no project)".dimmed()
    };
    println!("{} [{}]", Menu::title().bold(), state);

    for entry in Menu::entries(l10n) {
        match entry {
            MenuEntry::Separator => println!("  {}", "─".repeat(30).dimmed()),
            MenuEntry::Command { .. } => println!("  {entry}"),
        }
    }

    println!();
    println!("{} {}", "Help:".bold(), Menu::help_entry(l10n));

    Outcome::Done
}

/// Pick the message catalog from `--lang` or `$LANG`.
fn build_localizer(lang: Option<&str>, locale_dir: Option<&Path>) -> Localizer {
    let language = lang.map_or_else(
        || Localizer::language_from_locale(&std::env::var("LANG").unwrap_or_default()),
        Localizer::language_from_locale,
    );

    let dir = locale_dir.map_or_else(default_locale_dir, Path::to_path_buf);
    Localizer::load(&dir, &language)
}

/// `locale/` next to the executable.
fn default_locale_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("locale")))
        .unwrap_or_else(|| PathBuf::from("locale"))
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
