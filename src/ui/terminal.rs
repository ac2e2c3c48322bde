//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, Theme, UserInterface};

/// Writes command output to stdout and status lines to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: Theme,
}

impl TerminalUI {
    pub fn new() -> Self {
        let theme = if should_use_colors() {
            Theme::new()
        } else {
            Theme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn output(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }
}
