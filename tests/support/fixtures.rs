//! Test fixtures and constants.

/// Local development environment value.
pub const LOCAL_DEV: &str = "local-dev";

/// Remote environment value, also its context name.
pub const STAGING: &str = "staging";

/// Context active before each scripted run.
pub const ORIGINAL_CONTEXT: &str = "prod-admin";

/// Context used for local-dev.
pub const LOCAL_CONTEXT: &str = "rancher-desktop";

/// Index of each environment in the selection prompt.
pub const LOCAL_DEV_INDEX: usize = 0;
pub const STAGING_INDEX: usize = 1;

/// Index of each output mode in the destination prompt.
pub const SERVICE_MODE: usize = 0;
pub const OUTPUT_MODE: usize = 1;
