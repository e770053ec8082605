//! Repository folder layout.
//!
//! ```text
//! <root>/kubernetes/apps/<service>/                     services to choose from
//! <root>/kubernetes/apps-derived/<env>/<service>/secrets/<name>.{enc,sealed}.yaml
//! output/secrets/<env>/<name>.{enc,sealed}.yaml          generic output
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::Config;
use crate::core::constants;
use crate::core::types::{Destination, ServiceName, Target};
use crate::error::Result;

/// Resolved paths for one run.
#[derive(Debug, Clone)]
pub struct Layout {
    /// `<root>/kubernetes/apps`
    pub services: PathBuf,
    /// `<root>/kubernetes/apps-derived`
    pub overlays: PathBuf,
    /// `output/secrets`
    pub output: PathBuf,
    /// Plaintext manifest for sops
    pub scratch_file: PathBuf,
}

impl Layout {
    pub fn from_config(config: &Config) -> Self {
        Self {
            services: config.root.join(&config.services_dir),
            overlays: config.root.join(&config.overlays_dir),
            output: config.output_dir.clone(),
            scratch_file: config.scratch_file.clone(),
        }
    }

    /// Layout with every folder under a single base directory
    pub fn under(base: &Path) -> Self {
        Self {
            services: base.join(constants::SERVICES_DIR),
            overlays: base.join(constants::OVERLAYS_DIR),
            output: base.join(constants::OUTPUT_DIR),
            scratch_file: base.join(constants::SCRATCH_FILE),
        }
    }

    /// Sorted service folder names.
    ///
    /// A missing services folder yields an empty list. Files and hidden
    /// entries are ignored; symlinks to directories count as services.
    pub fn list_services(&self) -> Result<Vec<ServiceName>> {
        if !self.services.is_dir() {
            debug!(path = %self.services.display(), "services folder missing");
            return Ok(Vec::new());
        }

        let mut services = Vec::new();
        for entry in std::fs::read_dir(&self.services)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            services.push(name);
        }

        services.sort();
        debug!(count = services.len(), "found services");
        Ok(services)
    }

    /// `<overlays>/<env>/<service>/secrets`
    pub fn service_folder(&self, target: &Target, service: &str) -> PathBuf {
        self.overlays
            .join(&target.value)
            .join(service)
            .join(constants::SECRETS_FOLDER)
    }

    /// `<output>/<env>`
    pub fn output_folder(&self, target: &Target) -> PathBuf {
        self.output.join(&target.value)
    }

    /// Destination inside a service's secrets folder
    pub fn service_destination(&self, target: &Target, service: &str, secret: &str) -> Destination {
        let folder = self.service_folder(target, service);
        Self::destination(target, folder, secret)
    }

    /// Destination inside the generic output folder
    pub fn output_destination(&self, target: &Target, secret: &str) -> Destination {
        let folder = self.output_folder(target);
        Self::destination(target, folder, secret)
    }

    fn destination(target: &Target, folder: PathBuf, secret: &str) -> Destination {
        let file = folder.join(target.file_name(secret));
        Destination {
            target: target.clone(),
            folder,
            file,
        }
    }
}
