//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips ANSI codes when the stream
//! is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Semantic colors for CLI output
pub trait Stylize {
    /// De-emphasized text (hashes, hints)
    fn muted(&self) -> String;
    /// Bold text for headings and names
    fn emphasis(&self) -> String;
    /// Highlighted values
    fn accent(&self) -> String;
    /// Error prefix
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn error(&self) -> String {
        self.red().bold().to_string()
    }
}

/// Spinner shown on stderr while queries run
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner().tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
}
