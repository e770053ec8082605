//! create-secret - Interactive wizard for Kubernetes secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use create_secret::cli::{execute, output, Cli};
use create_secret::error::{CommandError, ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("CREATE_SECRET_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("create_secret=debug")
        } else {
            EnvFilter::new("create_secret=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::NotInteractive => Some("run create-secret from a terminal"),
            Error::Config(ConfigError::Parse(_)) => Some("check .create-secret.toml"),
            Error::Command(CommandError::Spawn { .. }) => {
                Some("install kubectl, kubeseal and sops, or set them under [tools]")
            }
            Error::Incomplete { .. } => {
                Some("fix the errors above and re-run for those environments")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
