//! Menu entries offered to the host.
//!
//! The host builds its own widgets from [`Menu::entries`] and routes every
//! selection back through [`Menu::dispatch`].

use std::fmt;

use crate::domain::{Converter, DocumentLauncher, HostModel, HostView, Result};

use super::commands::{Outcome, SyncCommands, APPLICATION};
use super::localizer::Localizer;

/// A selectable menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Info,
    Export,
    Import,
    EditTimeline,
    Help,
}

impl MenuCommand {
    /// English label, also the message id for translation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Information",
            Self::Export => "Create or update the timeline",
            Self::Import => "Update the project",
            Self::EditTimeline => "Edit the timeline",
            Self::Help => "Timeline plugin Online help",
        }
    }
}

/// One line of the submenu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Command { label: String, command: MenuCommand },
    Separator,
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command { label, .. } => write!(f, "{label}"),
            Self::Separator => write!(f, "---"),
        }
    }
}

/// Submenu state. Starts disabled until the host reports an open project.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    enabled: bool,
}

impl Menu {
    #[must_use]
    pub const fn new() -> Self {
        Self { enabled: false }
    }

    /// Title of the submenu in the host's tools menu.
    #[must_use]
    pub const fn title() -> &'static str {
        APPLICATION
    }

    /// Submenu entries in display order.
    #[must_use]
    pub fn entries(l10n: &Localizer) -> Vec<MenuEntry> {
        let command = |command: MenuCommand| MenuEntry::Command {
            label: l10n.tr(command.label()).to_string(),
            command,
        };

        vec![
            command(MenuCommand::Info),
            MenuEntry::Separator,
            command(MenuCommand::Export),
            command(MenuCommand::Import),
            MenuEntry::Separator,
            command(MenuCommand::EditTimeline),
        ]
    }

    /// Entry for the host's help menu; always available.
    #[must_use]
    pub fn help_entry(l10n: &Localizer) -> MenuEntry {
        MenuEntry::Command {
            label: l10n.tr(MenuCommand::Help.label()).to_string(),
            command: MenuCommand::Help,
        }
    }

    /// Called by the host whenever a project is opened or closed.
    pub fn set_enabled(&mut self, project_open: bool) {
        self.enabled = project_open;
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run `command`. Submenu commands do nothing while the menu is
    /// disabled; help always works.
    ///
    /// # Errors
    /// Returns whatever error the command itself returns.
    pub fn dispatch<M, V, C, L>(
        &self,
        commands: &mut SyncCommands<M, V, C, L>,
        command: MenuCommand,
    ) -> Result<Outcome>
    where
        M: HostModel,
        V: HostView,
        C: Converter,
        L: DocumentLauncher,
    {
        if command == MenuCommand::Help {
            commands.open_help()?;
            return Ok(Outcome::Done);
        }

        if !self.enabled {
            tracing::debug!(?command, "Menu disabled, ignoring command");
            return Ok(Outcome::NoProject);
        }

        match command {
            MenuCommand::Info => Ok(commands.show_info()),
            MenuCommand::Export => commands.export_to_timeline(),
            MenuCommand::Import => commands.import_from_timeline(),
            MenuCommand::EditTimeline => commands.launch_editor(),
            MenuCommand::Help => Ok(Outcome::Done),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::tests::fixture;
    use crate::application::commands::HELP_URL;

    #[test]
    fn test_entries_in_order() {
        let labels: Vec<String> = Menu::entries(&Localizer::english())
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            labels,
            vec![
                "Information",
                "---",
                "Create or update the timeline",
                "Update the project",
                "---",
                "Edit the timeline",
            ]
        );
    }

    #[test]
    fn test_disabled_menu_ignores_commands() {
        let (_dir, mut commands) = fixture(true, true);
        let menu = Menu::new();

        let outcome = menu.dispatch(&mut commands, MenuCommand::Export).unwrap();

        assert_eq!(outcome, Outcome::NoProject);
        assert!(commands.view().questions.is_empty());
    }

    #[test]
    fn test_enabled_menu_dispatches() {
        let (_dir, mut commands) = fixture(true, true);
        let mut menu = Menu::new();
        menu.set_enabled(true);

        assert!(menu.is_enabled());
        menu.dispatch(&mut commands, MenuCommand::Info).unwrap();
        assert_eq!(commands.view().infos.len(), 1);

        menu.set_enabled(false);
        assert!(!menu.is_enabled());
        let outcome = menu.dispatch(&mut commands, MenuCommand::Info).unwrap();
        assert_eq!(outcome, Outcome::NoProject);
        assert_eq!(commands.view().infos.len(), 1);
    }

    #[test]
    fn test_help_works_while_disabled() {
        let (_dir, mut commands) = fixture(true, false);

        Menu::new()
            .dispatch(&mut commands, MenuCommand::Help)
            .unwrap();

        assert_eq!(*commands.launcher().urls.borrow(), vec![HELP_URL]);
    }
}
