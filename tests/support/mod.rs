//! Test support utilities for create-secret integration tests.
//!
//! Provides an isolated repository layout plus scripted stand-ins for the
//! terminal and the external tools.

#![allow(dead_code)]

pub mod assertions;
pub mod fakes;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fakes::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use create_secret::core::config::{Config, EnvironmentChoice};
use create_secret::core::layout::Layout;
use tempfile::TempDir;

/// Isolated repository checkout.
///
/// Every path lives under one temp dir and no process-global state is
/// mutated, so tests can run in parallel.
pub struct Repo {
    pub dir: TempDir,
    pub layout: Layout,
    pub config: Config,
}

impl Repo {
    /// Empty repository offering the `local-dev` and `staging` environments.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let layout = Layout::under(dir.path());
        let config = Config {
            environments: vec![
                EnvironmentChoice {
                    name: "local-dev (SOPS)".to_string(),
                    value: LOCAL_DEV.to_string(),
                },
                EnvironmentChoice {
                    name: "Staging (Kubeseal)".to_string(),
                    value: STAGING.to_string(),
                },
            ],
            ..Config::default()
        };

        Self {
            dir,
            layout,
            config,
        }
    }

    /// Repository with service folders under `kubernetes/apps`.
    pub fn with_services(services: &[&str]) -> Self {
        let repo = Self::new();
        for service in services {
            fs::create_dir_all(repo.layout.services.join(service))
                .expect("failed to create service folder");
        }
        repo
    }

    /// `kubernetes/apps-derived/<env>/<service>/secrets`
    pub fn secrets_folder(&self, env: &str, service: &str) -> PathBuf {
        self.layout.overlays.join(env).join(service).join("secrets")
    }

    /// Create the secrets folder for an environment and service.
    pub fn create_secrets_folder(&self, env: &str, service: &str) -> PathBuf {
        let folder = self.secrets_folder(env, service);
        fs::create_dir_all(&folder).expect("failed to create secrets folder");
        folder
    }

    /// Place an existing secret file in a service secrets folder.
    pub fn create_secret_file(&self, env: &str, service: &str, file: &str) -> PathBuf {
        let path = self.create_secrets_folder(env, service).join(file);
        fs::write(&path, "old: secret\n").expect("failed to write secret file");
        path
    }

    /// `output/secrets/<env>`
    pub fn output_folder(&self, env: &str) -> PathBuf {
        self.layout.output.join(env)
    }
}
