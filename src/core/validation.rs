//! Input validation for wizard prompts.

use crate::error::{Result, ValidationError};

/// Validate a secret name.
///
/// The name becomes the manifest name, the data key and the output file stem,
/// so beyond being non-empty it must be usable as a single path segment:
/// - No `/` or `\`
/// - No whitespace
/// - Not `.` or `..`
///
/// # Errors
///
/// Returns `ValidationError` if the name is invalid.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptySecretName.into());
    }

    let invalid = |reason: &str| -> Result<()> {
        Err(ValidationError::InvalidSecretName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into())
    };

    if name == "." || name == ".." {
        return invalid("cannot be a relative path");
    }

    for (i, ch) in name.chars().enumerate() {
        if ch == '/' || ch == '\\' {
            return invalid(&format!("path separator at position {}", i + 1));
        }
        if ch.is_whitespace() {
            return invalid(&format!("whitespace at position {}", i + 1));
        }
    }

    Ok(())
}
