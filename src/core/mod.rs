//! Core library components.
//!
//! Layout resolution, the write guard, cluster context handling and the
//! external tool calls that produce sealed and encrypted secrets.

pub mod cluster;
pub mod config;
pub mod constants;
pub mod exec;
pub mod guard;
pub mod layout;
pub mod manifest;
pub mod materialize;
pub mod precheck;
pub mod prompt;
pub mod types;
pub mod validation;
