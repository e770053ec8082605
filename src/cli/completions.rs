//! `create-secret completions <shell>`.
//!
//! The wizard itself takes no subcommand, so the generated script only
//! completes the global `--root`, `--config` and `--verbose` flags and the
//! `completions` subcommand.

use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};

use crate::cli::{Cli, Shell};
use crate::error::Result;

/// Write the completion script for `shell` to stdout.
pub fn execute(shell: Shell) -> Result<()> {
    let shell = match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
    };

    let mut cli = Cli::command();
    let bin = cli.get_name().to_string();
    generate(shell, &mut cli, bin, &mut std::io::stdout());
    Ok(())
}
