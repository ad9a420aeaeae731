//! Runs scaffolding steps in order: a declined overwrite is a skip, any error stops the run.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::context::ProjectContext;
use crate::gate::{Outcome, gate};
use crate::output::Output;
use crate::prompt::Prompter;
use crate::steps::{Step, init_steps};

/// Outcome of one step in a completed run.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: String,
    pub target: PathBuf,
    pub outcome: Outcome,
}

/// Result of a completed pipeline run.
#[derive(Debug, Default)]
pub struct Report {
    pub steps: Vec<StepReport>,
}

impl Report {
    pub fn applied(&self) -> usize {
        self.count(Outcome::Proceeded)
    }

    pub fn skipped(&self) -> usize {
        self.count(Outcome::Skipped)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.steps.iter().filter(|s| s.outcome == outcome).count()
    }
}

/// An ordered list of steps executed one after another.
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The `clia init` pipeline.
    pub fn init() -> Self {
        Self::new(init_steps())
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step against `ctx`.
    ///
    /// Steps already applied stay applied when a later step fails; re-running is the recovery.
    pub fn run(
        &self,
        ctx: &mut ProjectContext,
        prompter: &mut dyn Prompter,
        out: &Output,
    ) -> Result<Report> {
        let mut report = Report::default();

        for step in &self.steps {
            let name = step.name();
            let target = step.target(ctx);
            out.step(step.announcement());

            let result = match step.conflict(ctx) {
                Some(conflict) => gate(step.exists(ctx), &conflict, prompter, out, || {
                    step.apply(ctx)
                }),
                None => step.apply(ctx).map(|()| Outcome::Proceeded),
            };

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    out.error(format_args!(
                        "init stopped at step '{name}'; earlier steps remain applied, re-run to resume"
                    ));
                    return Err(e).with_context(|| {
                        format!("step '{name}' failed for {}", target.display())
                    });
                }
            };

            report.steps.push(StepReport {
                name,
                target,
                outcome,
            });
        }

        Ok(report)
    }
}
