//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. The dispatcher owns the type
//! registry and the host probe so every command loads providers the same
//! way.

pub mod call;
pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use crate::loader::ConfigFile;
use crate::pipeline::LoadOptions;
use crate::ui::UserInterface;

/// Warn when a provider file was asked for but none exists.
///
/// Loading still goes ahead and yields an empty collection.
pub(crate) fn warn_missing_file(options: &LoadOptions, ui: &mut dyn UserInterface) {
    match &options.file {
        Some(ConfigFile::Path(path)) if !path.is_file() => {
            ui.warning(&format!("Provider file not found: {}", path.display()));
        }
        Some(file @ ConfigFile::Search(paths)) if file.locate().is_none() => {
            let searched: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            ui.warning(&format!(
                "No provider file found (searched {})",
                searched.join(", ")
            ));
        }
        _ => {}
    }
}
