//! Pre-run kubectl check.
//!
//! Rancher Desktop ships its own kubectl under `~/.rd/bin`. When that one
//! wins on `PATH`, remote auth breaks and context switches can hang, so the
//! wizard offers to move it out of the way before doing anything else.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::core::constants;
use crate::core::exec::CommandRunner;
use crate::core::prompt::Prompter;
use crate::error::Result;

/// What the check found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precheck {
    /// kubectl resolves to a regular binary
    Ok(PathBuf),
    /// kubectl is not on `PATH`; commands needing it will fail later
    Missing,
    /// The bundled shim was renamed
    Renamed { from: PathBuf, to: PathBuf },
    /// The user kept the bundled shim
    Kept(PathBuf),
    /// The rename was attempted and failed
    RenameFailed { path: PathBuf, reason: String },
}

/// True if `path` lives in a `.rd/bin` directory.
pub fn is_bundled_shim(path: &Path) -> bool {
    let parts: Vec<&std::ffi::OsStr> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    parts.windows(2).any(|pair| {
        pair[0] == constants::BUNDLED_KUBECTL_DIR[0] && pair[1] == constants::BUNDLED_KUBECTL_DIR[1]
    })
}

/// Path the shim is moved to: `kubectl` becomes `kubectl_back`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(constants::BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Check which kubectl is active and offer to rename the bundled shim.
pub fn run<R: CommandRunner, P: Prompter>(
    kubectl: &str,
    runner: &R,
    prompter: &mut P,
) -> Result<Precheck> {
    let Some(path) = runner.which(kubectl) else {
        debug!(kubectl, "kubectl not found on PATH");
        return Ok(Precheck::Missing);
    };

    if !is_bundled_shim(&path) {
        debug!(path = %path.display(), "kubectl ok");
        return Ok(Precheck::Ok(path));
    }

    let to = backup_path(&path);
    let fix = prompter.confirm(&format!(
        "WARNING: {} kubectl found, stage/prod auth is possibly broken and context switches can hang.\nRename it to {}?",
        path.display(),
        to.display()
    ))?;

    if !fix {
        return Ok(Precheck::Kept(path));
    }

    match std::fs::rename(&path, &to) {
        Ok(()) => {
            debug!(from = %path.display(), to = %to.display(), "renamed bundled kubectl");
            Ok(Precheck::Renamed { from: path, to })
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "rename failed");
            Ok(Precheck::RenameFailed {
                path,
                reason: e.to_string(),
            })
        }
    }
}
