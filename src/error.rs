//! Error types for create-secret.
//!
//! Domain errors are grouped into sub-enums and wrapped by [`Error`], so
//! callers can match on the category while `?` keeps working everywhere.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to render manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cancelled, nothing was written")]
    Cancelled,

    #[error("an interactive terminal is required")]
    NotInteractive,

    #[error("{failed} of {total} environments failed")]
    Incomplete { failed: usize, total: usize },
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no environments configured")]
    NoEnvironments,

    #[error("duplicate environment: {0}")]
    DuplicateEnvironment(String),

    #[error("invalid environment value '{value}': {reason}")]
    InvalidEnvironment { value: String, reason: String },
}

/// External command errors.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` printed non-UTF-8 output")]
    InvalidOutput { command: String },
}

/// User input errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("secret name cannot be empty")]
    EmptySecretName,

    #[error("invalid secret name '{name}': {reason}")]
    InvalidSecretName { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
