//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use providerkit::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.output("[]");
//! ui.error("No providers available");
//!
//! assert_eq!(ui.outputs(), ["[]"]);
//! assert!(ui.has_error("No providers"));
//! ```

use super::UserInterface;

/// Captures everything written to it.
#[derive(Debug, Default)]
pub struct MockUI {
    outputs: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured command output.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Check if any output contains the given text.
    pub fn has_output(&self, text: &str) -> bool {
        self.outputs.iter().any(|o| o.contains(text))
    }

    /// Check if any error contains the given text.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|e| e.contains(msg))
    }

    /// Check if any warning contains the given text.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(msg))
    }

    /// Everything written, output first.
    pub fn all_text(&self) -> String {
        self.outputs
            .iter()
            .chain(&self.warnings)
            .chain(&self.errors)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl UserInterface for MockUI {
    fn output(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_each_channel() {
        let mut ui = MockUI::new();
        ui.output("out");
        ui.warning("careful");
        ui.error("bad");

        assert_eq!(ui.outputs(), ["out"]);
        assert!(ui.has_warning("care"));
        assert!(ui.has_error("bad"));
        assert_eq!(ui.all_text(), "out\ncareful\nbad");
    }
}
