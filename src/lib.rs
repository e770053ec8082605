//! create-secret - Interactive wizard for Kubernetes secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── wizard        # Prompt flow and reporting
//! │   ├── prompt        # dialoguer-backed prompts
//! │   ├── output        # Terminal output helpers
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .create-secret.toml
//!     ├── layout        # Service and output folder paths
//!     ├── precheck      # Rancher Desktop kubectl check
//!     ├── guard         # Folder creation / overwrite confirmation
//!     ├── cluster       # kubectl context session
//!     ├── exec          # External command runner
//!     ├── manifest      # Plaintext Secret manifest for sops
//!     └── materialize   # sops / kubeseal per environment
//! ```
//!
//! # Flow
//!
//! 1. Check that kubectl is not the Rancher Desktop shim
//! 2. Prompt for environments, name, value and destination
//! 3. Confirm folder creation and overwrites for service output
//! 4. Encrypt (local) or seal (remote) once per environment
//! 5. Switch back to the original kubectl context

pub mod cli;
pub mod core;
pub mod error;
