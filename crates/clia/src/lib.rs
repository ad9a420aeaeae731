//! clia — scaffold a command-line layer into an existing Node project.
//! Re-exports all modules and contains `init()`: precheck, entrypoint name, then the scaffolding pipeline.

pub(crate) mod assets;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod steps;

use anyhow::Result;
use console::style;
use std::path::Path;

use cli::{Cli, Command};
use config::Config;
use context::ProjectContext;
use manifest::Manifest;
use output::Output;
use pipeline::{Pipeline, Report};
use prompt::{Prompter, TerminalPrompter};

const CLI_NAME_QUESTION: &str = "What would you like the cli command entrypoint to be named?";

/// Run the CLI with parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    config.validate()?;
    let out = Output::new(cli.quiet);

    match cli.command {
        Command::Init { dir, cli_name } => {
            init(
                &config,
                dir.as_deref(),
                cli_name,
                &mut TerminalPrompter,
                &out,
            )?;
        }
    }

    Ok(())
}

/// Initialize the project at `dir` (default: current directory) with clia resources.
///
/// Fails before touching the filesystem if the directory has no `package.json`.
pub fn init(
    config: &Config,
    dir: Option<&Path>,
    cli_name: Option<String>,
    prompter: &mut dyn Prompter,
    out: &Output,
) -> Result<Report> {
    let root = context::resolve_root(dir)?;
    context::precheck(&root)?;
    let manifest = Manifest::load(&root)?;

    out.info(format_args!("Initializing project in {} for clia", root.display()));

    let cli_name = match cli_name {
        Some(name) => name,
        None => prompter.input(CLI_NAME_QUESTION, &config.default_cli_name)?,
    };
    let cli_name = cli_name.trim().to_string();
    context::validate_cli_name(&cli_name)?;

    let mut ctx = ProjectContext::new(root, cli_name, manifest);
    let report = Pipeline::init().run(&mut ctx, prompter, out)?;

    let skipped = if report.skipped() > 0 {
        format!(", {} skipped", style(report.skipped()).yellow())
    } else {
        String::new()
    };
    out.info(format_args!(
        "{} {} step(s) applied{}",
        style("clia init complete:").green().bold(),
        style(report.applied()).cyan(),
        skipped
    ));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InitError;
    use crate::prompt::testing::ScriptedPrompter;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), r#"{"name":"x"}"#).unwrap();
        tmp
    }

    fn quiet() -> Output {
        Output::new(true)
    }

    #[test]
    fn missing_manifest_fails_before_any_mutation() {
        let tmp = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new();

        let err = init(
            &Config::default(),
            Some(tmp.path()),
            None,
            &mut prompter,
            &quiet(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InitError>(),
            Some(InitError::ManifestNotFound { .. })
        ));
        assert!(prompter.asked.is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn malformed_manifest_fails_before_any_mutation() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), "not json").unwrap();

        let result = init(
            &Config::default(),
            Some(tmp.path()),
            Some("mycli".into()),
            &mut ScriptedPrompter::new(),
            &quiet(),
        );

        assert!(result.is_err());
        assert!(!tmp.path().join("config").exists());
    }

    #[test]
    fn prompts_for_entrypoint_name_with_config_default() {
        let tmp = project();
        let config = Config {
            default_cli_name: "tool".into(),
        };
        let mut prompter = ScriptedPrompter::new().accepting_default();

        init(&config, Some(tmp.path()), None, &mut prompter, &quiet()).unwrap();

        assert_eq!(prompter.asked, [CLI_NAME_QUESTION]);
        assert!(tmp.path().join("tool").is_file());
    }

    #[test]
    fn answered_entrypoint_name_is_trimmed() {
        let tmp = project();
        let mut prompter = ScriptedPrompter::new().answering("  mycli ");

        init(
            &Config::default(),
            Some(tmp.path()),
            None,
            &mut prompter,
            &quiet(),
        )
        .unwrap();

        assert!(tmp.path().join("mycli").is_file());
    }

    #[test]
    fn flag_entrypoint_name_skips_prompt() {
        let tmp = project();
        let mut prompter = ScriptedPrompter::new();

        let report = init(
            &Config::default(),
            Some(tmp.path()),
            Some("mycli".into()),
            &mut prompter,
            &quiet(),
        )
        .unwrap();

        assert!(prompter.asked.is_empty());
        assert_eq!(report.applied(), 7);
        assert!(tmp.path().join("mycli").is_file());
    }

    #[test]
    fn invalid_entrypoint_name_fails_before_any_mutation() {
        let tmp = project();

        let err = init(
            &Config::default(),
            Some(tmp.path()),
            Some("../escape".into()),
            &mut ScriptedPrompter::new(),
            &quiet(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InitError>(),
            Some(InitError::InvalidCliName { .. })
        ));
        assert!(!tmp.path().join("config").exists());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("package.json")).unwrap(),
            r#"{"name":"x"}"#
        );
    }
}
