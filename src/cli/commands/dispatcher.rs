//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::rc::Rc;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::readiness::Probe;
use crate::registry::TypeRegistry;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for output and status lines
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    registry: TypeRegistry,
    probe: Rc<Probe>,
}

impl CommandDispatcher {
    /// Create a dispatcher over `registry`. Every provider it builds
    /// resolves packages and environment variables through `probe`.
    pub fn new(registry: TypeRegistry, probe: Probe) -> Self {
        Self {
            registry,
            probe: Rc::new(probe),
        }
    }

    /// Get the type registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(
                    &self.registry,
                    Rc::clone(&self.probe),
                    &cli.lib,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Try(args) => {
                let cmd = super::call::TryCommand::new(
                    &self.registry,
                    Rc::clone(&self.probe),
                    &cli.lib,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Schema => super::schema::SchemaCommand::new().execute(ui),
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatches_schema() {
        let dispatcher = CommandDispatcher::new(TypeRegistry::new(), Probe::empty());
        let cli = Cli::try_parse_from(["providerkit", "schema"]).unwrap();
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_output("\"class\""));
    }

    #[test]
    fn dispatches_list_over_builtins() {
        let dispatcher = CommandDispatcher::new(TypeRegistry::with_builtins(), Probe::empty());
        let cli = Cli::try_parse_from(["providerkit", "list", "--lib", "providerkit"]).unwrap();
        let mut ui = MockUI::new();

        dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(ui.has_output("spain_alphabet"));
    }
}
