//! Interactive input.
//!
//! The wizard asks every question through [`Prompter`]. The terminal
//! implementation lives in `cli::prompt`; tests drive the same flow with a
//! scripted implementation.

use crate::error::Result;

/// Validator applied to free-text answers before they are accepted.
pub type Validator = fn(&str) -> Result<()>;

/// Source of answers for the wizard.
///
/// Implementations return `Error::Cancelled` when the user backs out of a
/// prompt.
pub trait Prompter {
    /// Pick any number of `items`; returns the chosen indices in list order.
    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;

    /// Pick exactly one of `items`.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Free text, re-asked until `validate` accepts it.
    fn input(&mut self, prompt: &str, validate: Validator) -> Result<String>;

    /// Hidden free text. An empty answer is allowed.
    fn password(&mut self, prompt: &str) -> Result<String>;

    /// Yes/no question.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}
