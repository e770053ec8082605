//! Cluster context handling.
//!
//! The kubectl "current context" is process-global state shared by every
//! command. [`ClusterSession`] owns it for the duration of a run: it records
//! the context active before the wizard started, serialises every switch,
//! and switches back at the end.

use tracing::{debug, warn};

use crate::core::exec::{CommandRunner, Invocation};
use crate::core::types::ContextName;
use crate::error::Result;

/// Read the active kubectl context.
pub fn current_context<R: CommandRunner>(runner: &mut R, kubectl: &str) -> Result<ContextName> {
    runner.run_text(&Invocation::new(kubectl).args(["config", "current-context"]))
}

/// Make `context` the active kubectl context.
pub fn use_context<R: CommandRunner>(runner: &mut R, kubectl: &str, context: &str) -> Result<()> {
    runner.run(&Invocation::new(kubectl).args(["config", "use-context", context]))?;
    Ok(())
}

/// Explicit owner of the kubectl context for one wizard run.
#[derive(Debug)]
pub struct ClusterSession {
    kubectl: String,
    original: Option<ContextName>,
    active: Option<ContextName>,
    switches: usize,
}

/// Result of [`ClusterSession::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restore {
    /// Switched back to the original context
    Restored(ContextName),
    /// No switch happened, nothing to undo
    Unchanged,
    /// The original context was never captured
    Skipped,
    /// Switching back to the original context failed
    Failed(ContextName),
}

impl ClusterSession {
    /// Capture the active context.
    ///
    /// A failing capture (kubectl missing, no current context) is not fatal:
    /// the session then skips the final restore.
    pub fn capture<R: CommandRunner>(runner: &mut R, kubectl: &str) -> Self {
        let original = match current_context(runner, kubectl) {
            Ok(ctx) if !ctx.is_empty() => {
                debug!(context = %ctx, "captured current context");
                Some(ctx)
            }
            Ok(_) => {
                warn!("kubectl reported an empty current context");
                None
            }
            Err(e) => {
                warn!(error = %e, "could not read current context");
                None
            }
        };

        Self {
            kubectl: kubectl.to_string(),
            active: original.clone(),
            original,
            switches: 0,
        }
    }

    /// Context active before the run, if it could be read
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Context most recently switched to
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Number of successful switches so far
    pub fn switches(&self) -> usize {
        self.switches
    }

    /// Switch to `context`.
    ///
    /// # Errors
    ///
    /// Returns the kubectl failure; the active context is then unknown and
    /// left as last recorded.
    pub fn switch<R: CommandRunner>(&mut self, runner: &mut R, context: &str) -> Result<()> {
        debug!(context, "switching context");
        use_context(runner, &self.kubectl, context)?;
        self.active = Some(context.to_string());
        self.switches += 1;
        Ok(())
    }

    /// Switch back to the original context.
    ///
    /// Consumes the session. Best effort: a failure is returned to the caller
    /// to report, there is nothing further to clean up.
    pub fn restore<R: CommandRunner>(self, runner: &mut R) -> Result<Restore> {
        let Some(original) = self.original else {
            debug!("no original context, skipping restore");
            return Ok(Restore::Skipped);
        };

        if self.switches == 0 {
            return Ok(Restore::Unchanged);
        }

        debug!(context = %original, "restoring context");
        use_context(runner, &self.kubectl, &original)?;
        Ok(Restore::Restored(original))
    }
}
