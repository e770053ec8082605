//! Constants used throughout create-secret.
//!
//! Centralizes magic strings and default layout values.

/// Configuration file name (.create-secret.toml).
pub const CONFIG_FILE: &str = ".create-secret.toml";

/// Repository root, relative to the working directory.
pub const DEFAULT_ROOT: &str = ".";

/// Folder holding one subdirectory per service, relative to the root.
pub const SERVICES_DIR: &str = "kubernetes/apps";

/// Folder holding `<env>/<service>/secrets`, relative to the root.
pub const OVERLAYS_DIR: &str = "kubernetes/apps-derived";

/// Generic output folder, relative to the working directory.
pub const OUTPUT_DIR: &str = "output/secrets";

/// Name of the per-service secrets folder.
pub const SECRETS_FOLDER: &str = "secrets";

/// Plaintext manifest handed to sops.
pub const SCRATCH_FILE: &str = "tmp/tempsecret.yaml";

/// Environment value that is encrypted locally with sops.
pub const LOCAL_ENVIRONMENT: &str = "local-dev";

/// Cluster context used for the local environment.
pub const LOCAL_CONTEXT: &str = "rancher-desktop";

/// File suffix for sops-encrypted secrets.
pub const ENCRYPTED_SUFFIX: &str = ".enc.yaml";

/// File suffix for kubeseal-sealed secrets.
pub const SEALED_SUFFIX: &str = ".sealed.yaml";

/// Path segments identifying the Rancher Desktop kubectl shim.
pub const BUNDLED_KUBECTL_DIR: [&str; 2] = [".rd", "bin"];

/// Suffix appended when moving the bundled kubectl out of the way.
pub const BACKUP_SUFFIX: &str = "_back";

/// Printed after a run so the new files get referenced.
pub const KUSTOMIZE_REMINDER: &str = "don't forget to include local secrets in secret-generator.yaml and remote secrets in kustomization.yaml";
