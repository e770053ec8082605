//! Configuration file management.
//!
//! Reads the optional `.create-secret.toml`. Every key has a default, so a
//! missing file behaves exactly like an empty one.
//!
//! ```toml
//! root = ".."
//! local_context = "rancher-desktop"
//!
//! [[environments]]
//! name = "kcat (Kubeseal)"
//! value = "cat"
//!
//! [tools]
//! kubeseal = "/opt/bin/kubeseal"
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Wizard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Repository root that holds the `kubernetes/` tree
    pub root: PathBuf,
    /// Service folders, relative to `root`
    pub services_dir: PathBuf,
    /// Per-environment overlay folders, relative to `root`
    pub overlays_dir: PathBuf,
    /// Generic output folder, relative to the working directory
    pub output_dir: PathBuf,
    /// Plaintext manifest location for the local environment
    pub scratch_file: PathBuf,
    /// Environment value that is encrypted with sops instead of sealed
    pub local_environment: String,
    /// Cluster context switched to for the local environment
    pub local_context: String,
    /// Environments offered in the selection prompt
    pub environments: Vec<EnvironmentChoice>,
    /// External program names
    pub tools: Tools,
}

/// One entry of the environment selection prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentChoice {
    /// Label shown to the user
    pub name: String,
    /// Environment value, also the remote cluster context name
    pub value: String,
}

/// External programs, resolved through `PATH` unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tools {
    pub kubectl: String,
    pub kubeseal: String,
    pub sops: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            kubectl: "kubectl".to_string(),
            kubeseal: "kubeseal".to_string(),
            sops: "sops".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(constants::DEFAULT_ROOT),
            services_dir: PathBuf::from(constants::SERVICES_DIR),
            overlays_dir: PathBuf::from(constants::OVERLAYS_DIR),
            output_dir: PathBuf::from(constants::OUTPUT_DIR),
            scratch_file: PathBuf::from(constants::SCRATCH_FILE),
            local_environment: constants::LOCAL_ENVIRONMENT.to_string(),
            local_context: constants::LOCAL_CONTEXT.to_string(),
            environments: vec![
                EnvironmentChoice {
                    name: "local-dev (SOPS)".to_string(),
                    value: constants::LOCAL_ENVIRONMENT.to_string(),
                },
                EnvironmentChoice {
                    name: "kcat (Kubeseal)".to_string(),
                    value: "cat".to_string(),
                },
            ],
            tools: Tools::default(),
        }
    }
}

impl Config {
    /// Default configuration path in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// `.create-secret.toml` is read when present and defaults are used
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit path,
    /// `ConfigError::Parse` for malformed TOML, or a validation error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.exists() {
            if required {
                return Err(ConfigError::NotFound(path).into());
            }
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        debug!(
            environments = config.environments.len(),
            root = %config.root.display(),
            "config loaded"
        );
        Ok(config)
    }

    /// Validate the environment list.
    ///
    /// Environment values become folder names and context names, so they must
    /// be non-empty single path segments and unique.
    pub fn validate(&self) -> Result<()> {
        if self.environments.is_empty() {
            return Err(ConfigError::NoEnvironments.into());
        }

        let mut seen = BTreeSet::new();
        for choice in &self.environments {
            let value = choice.value.as_str();
            let reason = if value.trim().is_empty() {
                Some("cannot be empty")
            } else if value.contains(&['/', '\\'][..]) {
                Some("cannot contain a path separator")
            } else if value == "." || value == ".." {
                Some("cannot be a relative path")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(ConfigError::InvalidEnvironment {
                    value: value.to_string(),
                    reason: reason.to_string(),
                }
                .into());
            }

            if !seen.insert(value) {
                return Err(ConfigError::DuplicateEnvironment(value.to_string()).into());
            }
        }

        Ok(())
    }
}
