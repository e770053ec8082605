//! Secret materialization.
//!
//! Turns a [`SecretRequest`] into files, one environment at a time, in
//! selection order. Each environment switches the cluster context first, so
//! environments are never processed concurrently.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::cluster::ClusterSession;
use crate::core::config::Tools;
use crate::core::exec::{CommandRunner, Invocation};
use crate::core::manifest::SecretManifest;
use crate::core::types::{Destination, Environment, SecretRequest, Target};
use crate::error::{Error, Result};

/// Result for a single environment.
#[derive(Debug)]
pub struct Outcome {
    pub target: Target,
    /// Written file, or the error that ended this environment
    pub result: Result<PathBuf>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Writes secrets using the external tools.
pub struct Materializer<'a, R: CommandRunner> {
    tools: &'a Tools,
    local_context: &'a str,
    scratch_file: &'a Path,
    runner: &'a mut R,
}

impl<'a, R: CommandRunner> Materializer<'a, R> {
    pub fn new(
        tools: &'a Tools,
        local_context: &'a str,
        scratch_file: &'a Path,
        runner: &'a mut R,
    ) -> Self {
        Self {
            tools,
            local_context,
            scratch_file,
            runner,
        }
    }

    /// Process every destination in order.
    ///
    /// A failure ends that environment only; the remaining environments still
    /// run and nothing already written is rolled back.
    pub fn materialize_all(
        &mut self,
        session: &mut ClusterSession,
        request: &SecretRequest,
        destinations: &[Destination],
    ) -> Vec<Outcome> {
        destinations
            .iter()
            .map(|dest| {
                let result = self.materialize(session, request, dest);
                match &result {
                    Ok(path) => info!(env = %dest.target, path = %path.display(), "secret written"),
                    Err(e) => warn!(env = %dest.target, error = %e, "secret failed"),
                }
                Outcome {
                    target: dest.target.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Produce one secret file.
    pub fn materialize(
        &mut self,
        session: &mut ClusterSession,
        request: &SecretRequest,
        dest: &Destination,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&dest.folder)?;

        let contents = match &dest.target.environment {
            Environment::LocalDevelopment => {
                session.switch(self.runner, self.local_context)?;
                self.encrypt(&request.name, &request.value)?
            }
            Environment::Remote(context) => {
                session.switch(self.runner, context)?;
                self.seal(&request.name, &request.value)?
            }
        };

        fs::write(&dest.file, contents)?;
        Ok(dest.file.clone())
    }

    /// `sops -e <scratch>` over a plaintext manifest.
    ///
    /// The scratch file is removed again whether or not sops succeeded.
    fn encrypt(&mut self, name: &str, value: &str) -> Result<Vec<u8>> {
        let manifest = SecretManifest::new(name, value).to_yaml()?;

        if let Some(parent) = self.scratch_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(self.scratch_file, manifest.as_bytes())?;
        debug!(path = %self.scratch_file.display(), "wrote scratch manifest");

        let invocation = Invocation::new(&self.tools.sops)
            .arg("-e")
            .arg(self.scratch_file.display().to_string());
        let result = self.runner.run(&invocation);

        if let Err(e) = fs::remove_file(self.scratch_file) {
            warn!(
                path = %self.scratch_file.display(),
                error = %e,
                "could not remove scratch manifest"
            );
        }

        result
    }

    /// `kubectl create secret generic ... --dry-run=client -o yaml | kubeseal -o yaml`
    fn seal(&mut self, name: &str, value: &str) -> Result<Vec<u8>> {
        let create = Invocation::new(&self.tools.kubectl)
            .args(["create", "secret", "generic", name])
            .secret_arg(&format!("--from-literal={}=", name), value)
            .args(["--dry-run=client", "-o", "yaml"]);
        let manifest = self.runner.run(&create)?;

        let seal = Invocation::new(&self.tools.kubeseal)
            .args(["-o", "yaml"])
            .stdin(manifest);
        self.runner.run(&seal)
    }
}

/// Count failed outcomes as an error.
pub fn summarize(outcomes: &[Outcome]) -> Result<()> {
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        return Err(Error::Incomplete {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}
