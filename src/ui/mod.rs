//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminals
//! - [`MockUI`] for tests
//! - [`Table`] and [`Theme`] for rendering

pub mod mock;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use table::{truncate, Table};
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Write command output (tables, JSON, XML) as is.
    fn output(&mut self, text: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}
