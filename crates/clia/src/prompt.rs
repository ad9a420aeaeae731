//! Interactive questions asked during `clia init`, behind a trait so the pipeline can be driven without a terminal.

use anyhow::Result;
use dialoguer::{Confirm, Input};

/// Capability to ask the operator questions.
pub trait Prompter {
    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Ask a free-text question, returning `default` when the operator just presses Enter.
    fn input(&mut self, question: &str, default: &str) -> Result<String>;
}

/// Prompts on the attached terminal using dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(true)
            .interact()?)
    }

    fn input(&mut self, question: &str, default: &str) -> Result<String> {
        Ok(Input::new()
            .with_prompt(question)
            .default(default.to_string())
            .interact_text()?)
    }
}
