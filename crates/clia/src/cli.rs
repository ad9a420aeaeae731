//! CLI argument parsing with clap. Defines the `Cli` struct and `Command` enum.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "clia",
    version,
    about = "Scaffold a command-line layer into an existing Node project",
    after_help = "Examples:\n  clia init\n  clia init --dir ./my-project --cli-name mycli"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (default: ~/.config/clia/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a Node project with clia resources
    Init {
        /// Target project directory (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// File name of the CLI entrypoint created at the project root
        #[arg(long)]
        cli_name: Option<String>,
    },
}
