//! Domain types for a single wizard run.

use std::fmt;
use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::core::constants;

/// A Kubernetes secret name, also used as the data key and file stem.
pub type SecretName = String;

/// A kubectl context name.
pub type ContextName = String;

/// A service folder name under `kubernetes/apps`.
pub type ServiceName = String;

/// How a secret is encoded for an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Encrypted at rest with sops against the local cluster
    LocalDevelopment,
    /// Sealed with kubeseal against the named cluster context
    Remote(ContextName),
}

impl Environment {
    /// File suffix for secrets produced for this environment
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::LocalDevelopment => constants::ENCRYPTED_SUFFIX,
            Self::Remote(_) => constants::SEALED_SUFFIX,
        }
    }

    /// Output file name for a secret
    pub fn file_name(&self, secret: &str) -> String {
        format!("{}{}", secret, self.suffix())
    }
}

/// A selected environment: the raw value plus its dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Environment value as configured, used as the folder name
    pub value: String,
    pub environment: Environment,
}

impl Target {
    /// Classify an environment value against the local-development literal.
    pub fn parse(value: &str, local_literal: &str) -> Self {
        let environment = if value == local_literal {
            Environment::LocalDevelopment
        } else {
            Environment::Remote(value.to_string())
        };

        Self {
            value: value.to_string(),
            environment,
        }
    }

    /// Output file name for a secret
    pub fn file_name(&self, secret: &str) -> String {
        self.environment.file_name(secret)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Where the generated files go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `kubernetes/apps-derived/<env>/<service>/secrets`
    Service,
    /// `output/secrets/<env>`
    Output,
}

impl OutputMode {
    pub const ALL: [OutputMode; 2] = [OutputMode::Service, OutputMode::Output];

    /// Label shown in the selection prompt
    pub fn label(&self) -> &'static str {
        match self {
            Self::Service => "in the service/secret folders (choose the service next)",
            Self::Output => "in the local ./output folder (copy the files over yourself)",
        }
    }
}

/// Everything gathered from the prompts.
pub struct SecretRequest {
    pub name: SecretName,
    pub value: Zeroizing<String>,
    pub targets: Vec<Target>,
    pub mode: OutputMode,
}

impl fmt::Debug for SecretRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRequest")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("targets", &self.targets)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Resolved location for one (environment, secret) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub target: Target,
    /// Folder the file is written into
    pub folder: PathBuf,
    /// Full path of the output file
    pub file: PathBuf,
}
