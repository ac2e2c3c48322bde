//! List command implementation.
//!
//! The `providerkit list` command loads providers, narrows them, and prints
//! their readiness.

use std::rc::Rc;

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::format::{format_providers, OutputFormat};
use crate::pipeline::get_providers;
use crate::readiness::Probe;
use crate::registry::TypeRegistry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    registry: &'a TypeRegistry,
    probe: Rc<Probe>,
    lib: String,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(registry: &'a TypeRegistry, probe: Rc<Probe>, lib: &str, args: ListArgs) -> Self {
        Self {
            registry,
            probe,
            lib: lib.to_string(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let format: OutputFormat = self.args.format.parse()?;
        let options = self.args.source.load_options(&self.lib);
        super::warn_missing_file(&options, ui);

        let providers = get_providers(self.registry, Rc::clone(&self.probe), &options)?;
        ui.output(&format_providers(&providers, format));

        Ok(CommandResult::success())
    }
}
