//! Styled terminal output.
//!
//! Commands print through [`Output`] instead of `println!`. It is also the
//! CLI's [`Reporter`], so load failures inside table views show up as regular
//! error lines.

use std::fmt::Display;

use brightpath_business::Reporter;
use console::{Term, style};

#[derive(Debug, Clone)]
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        drop(self.term.write_line(text));
    }

    /// Print a success message with a green checkmark.
    pub fn success(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("✓").green().bold()));
    }

    /// Print an error message with a red X.
    pub fn error(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("✗").red().bold()));
    }

    pub fn warning(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("⚠").yellow().bold()));
    }

    /// Print a plain message without any prefix.
    pub fn print(&self, message: impl Display) {
        self.line(&message.to_string());
    }

    pub fn newline(&self) {
        self.line("");
    }

    pub fn header(&self, message: impl Display) {
        self.line(&style(message).bold().cyan().to_string());
    }

    pub fn dim(&self, message: impl Display) {
        self.line(&style(message).dim().to_string());
    }

    /// Print a labeled value with indentation.
    pub fn labeled(&self, label: impl Display, value: impl Display, indent: usize) {
        let spaces = " ".repeat(indent);
        self.line(&format!("{spaces}{}: {value}", style(label).dim()));
    }

    /// Print a count summary.
    pub fn count(&self, label: impl Display, count: usize) {
        self.line(&format!(
            "{}: {}",
            style(label).dim(),
            style(count).cyan().bold()
        ));
    }
}

impl Reporter for Output {
    fn error(&self, message: &str) {
        Self::error(self, message);
    }

    fn success(&self, message: &str) {
        Self::success(self, message);
    }
}
