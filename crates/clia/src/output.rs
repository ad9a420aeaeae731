//! Operator-facing output: info lines on stdout, warnings and errors on stderr.

use console::style;

/// Prefix for step announcements.
const STEP_PAD: &str = "==>";

#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    /// Announce a pipeline step.
    pub fn step(&self, msg: impl std::fmt::Display) {
        self.info(format_args!("{} {}", style(STEP_PAD).cyan().bold(), msg));
    }

    pub fn warn(&self, msg: impl std::fmt::Display) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }

    pub fn error(&self, msg: impl std::fmt::Display) {
        eprintln!("{} {}", style("error:").red().bold(), msg);
    }
}
