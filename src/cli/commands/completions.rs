//! Shell completions generation.
//!
//! The `providerkit completions` command generates shell completion scripts.

use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// The completion script for the configured shell.
    pub fn script(&self) -> String {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(self.args.shell, &mut cmd, "providerkit", &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        ui.output(self.script().trim_end());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    #[test]
    fn generates_bash_completions() {
        let output = CompletionsCommand::new(CompletionsArgs { shell: Shell::Bash }).script();
        assert!(output.contains("providerkit"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn generates_zsh_completions() {
        let output = CompletionsCommand::new(CompletionsArgs { shell: Shell::Zsh }).script();
        assert!(output.contains("providerkit"));
    }

    #[test]
    fn generates_fish_completions() {
        let output = CompletionsCommand::new(CompletionsArgs { shell: Shell::Fish }).script();
        assert!(output.contains("providerkit"));
    }
}
