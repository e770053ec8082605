//! Write guard for service folders.
//!
//! Before anything is written into `kubernetes/apps-derived`, every missing
//! folder and every existing secret file is confirmed with the user. The
//! answers collapse into one decision: write into the service folders, or
//! fall back to the generic output folder.

use tracing::debug;

use crate::core::layout::Layout;
use crate::core::prompt::Prompter;
use crate::core::types::{ServiceName, Target};
use crate::error::Result;

/// Collected answers for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteDecision {
    service: Option<ServiceName>,
    confirmations: Vec<bool>,
}

impl WriteDecision {
    pub fn new(service: Option<ServiceName>, confirmations: Vec<bool>) -> Self {
        Self {
            service,
            confirmations,
        }
    }

    /// Service the decision applies to
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// Every answer given, in the order asked
    pub fn confirmations(&self) -> &[bool] {
        &self.confirmations
    }

    /// True when a service is selected and every answer was yes.
    ///
    /// No answers at all counts as approval.
    pub fn can_write(&self) -> bool {
        self.service.is_some() && self.confirmations.iter().all(|&ok| ok)
    }
}

/// Ask for every folder creation and overwrite the service output needs.
///
/// All questions are asked even after a "no", so the user sees everything
/// that would have been touched.
pub fn check<P: Prompter>(
    layout: &Layout,
    service: Option<&str>,
    targets: &[Target],
    secret: &str,
    prompter: &mut P,
) -> Result<WriteDecision> {
    let Some(service) = service else {
        return Ok(WriteDecision::default());
    };

    let mut confirmations = Vec::new();

    for target in targets {
        let dest = layout.service_destination(target, service, secret);

        if !dest.folder.exists() {
            let answer = prompter.confirm(&format!(
                "Folder {} missing, do you want it created?",
                dest.folder.display()
            ))?;
            debug!(env = %target, folder = %dest.folder.display(), answer, "create folder");
            confirmations.push(answer);
        }

        if dest.file.exists() {
            let answer = prompter.confirm(&format!(
                "Secret {} already exists, do you want to overwrite it?",
                dest.file.display()
            ))?;
            debug!(env = %target, file = %dest.file.display(), answer, "overwrite");
            confirmations.push(answer);
        }
    }

    Ok(WriteDecision::new(Some(service.to_string()), confirmations))
}
