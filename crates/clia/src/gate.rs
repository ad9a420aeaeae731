//! Confirm-before-overwrite: every destructive write in `clia init` goes through [`gate`].

use anyhow::Result;

use crate::output::Output;
use crate::prompt::Prompter;

/// Whether a step's action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Proceeded,
    Skipped,
}

/// What to tell the operator when the target of a write already exists.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// Warning naming the existing target.
    pub warning: String,
    /// Yes/no question asking to overwrite.
    pub question: &'static str,
    /// Notice emitted when the operator declines.
    pub skip_notice: String,
}

/// Run `on_proceed` unless the target exists and the operator declines to overwrite it.
///
/// The gate itself never touches the filesystem; all side effects live in `on_proceed`.
pub fn gate(
    target_exists: bool,
    conflict: &Conflict,
    prompter: &mut dyn Prompter,
    out: &Output,
    on_proceed: impl FnOnce() -> Result<()>,
) -> Result<Outcome> {
    if target_exists {
        out.warn(&conflict.warning);
        if !prompter.confirm(conflict.question)? {
            out.warn(&conflict.skip_notice);
            return Ok(Outcome::Skipped);
        }
    }
    on_proceed()?;
    Ok(Outcome::Proceeded)
}
