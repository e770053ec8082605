//! Command-line interface.

pub mod completions;
pub mod output;
pub mod prompt;
pub mod wizard;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// create-secret - Interactive wizard for sealed and sops-encrypted Kubernetes secrets.
#[derive(Parser)]
#[command(
    name = "create-secret",
    about = "Create sealed and sops-encrypted Kubernetes secrets interactively",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root holding the kubernetes/ folder
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file (defaults to .create-secret.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands. Without one, the wizard runs.
#[derive(Subcommand)]
pub enum Command {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute the parsed command line.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    match cli.command {
        Some(Command::Completions { shell }) => completions::execute(shell),
        None => wizard::execute(cli.config, cli.root),
    }
}
