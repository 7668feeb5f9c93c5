//! Host view for the terminal.

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;

use crate::domain::{HostView, OverwritePolicy};

/// Prompts on stdin and prints status lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalView {
    assume_yes: bool,
}

impl TerminalView {
    /// With `assume_yes`, every question is answered yes without prompting.
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Overwrite policy that asks on the terminal before a converter
    /// replaces an existing file.
    #[must_use]
    pub fn overwrite_prompt(self) -> OverwritePolicy {
        OverwritePolicy::from_fn(move |path| self.confirm_overwrite(path))
    }

    fn confirm_overwrite(mut self, path: &Path) -> bool {
        self.ask_yes_no(&format!("Overwrite {}?", path.display()))
    }
}

impl HostView for TerminalView {
    fn ask_yes_no(&mut self, question: &str) -> bool {
        if self.assume_yes {
            println!("{} {}", question, "yes".dimmed());
            return true;
        }

        match Confirm::new().with_prompt(question).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot prompt, assuming no");
                false
            }
        }
    }

    fn set_status(&mut self, message: &str) {
        if let Some(error) = message.strip_prefix('!') {
            println!("{} {}", "✗".red().bold(), error.red());
        } else if !message.is_empty() {
            println!("{} {}", "✓".green().bold(), message);
        }
    }

    fn show_info(&mut self, title: &str, message: &str) {
        println!("{}", title.bold());
        println!();
        for line in message.lines() {
            println!("  {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assume_yes_answers_without_prompting() {
        let mut view = TerminalView::new(true);
        assert!(view.ask_yes_no("Save the project and update it?"));
    }

    #[test]
    fn test_overwrite_prompt_follows_assume_yes() {
        let policy = TerminalView::new(true).overwrite_prompt();
        assert!(policy.confirm_overwrite(Path::new("draft.timeline")));
    }
}
