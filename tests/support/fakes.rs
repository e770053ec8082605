//! Scripted prompter and command runner.

use std::collections::VecDeque;
use std::path::PathBuf;

use create_secret::core::exec::{CommandRunner, Invocation};
use create_secret::core::prompt::{Prompter, Validator};
use create_secret::error::{CommandError, Error, Result};

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Answer {
    /// Multi-select indices
    Pick(Vec<usize>),
    /// Single-select index
    Choose(usize),
    /// Free text
    Text(String),
    /// Hidden text
    Secret(String),
    Yes,
    No,
    /// Back out of the prompt
    Cancel,
}

/// Answers prompts from a script and records every question.
///
/// Panics on a prompt the script did not expect.
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Prompter that expects no questions at all.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Questions that were confirmations
    pub fn confirmations_asked(&self) -> usize {
        self.asked.iter().filter(|q| q.starts_with("confirm:")).count()
    }

    /// Answers left unused
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, kind: &str, prompt: &str) -> Answer {
        self.asked.push(format!("{}: {}", kind, prompt));
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {} prompt: {}", kind, prompt))
    }
}

impl Prompter for ScriptedPrompter {
    fn multi_select(&mut self, prompt: &str, _items: &[String]) -> Result<Vec<usize>> {
        match self.next("multi_select", prompt) {
            Answer::Pick(picked) => Ok(picked),
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("expected Pick for '{}', script has {:?}", prompt, other),
        }
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        match self.next("select", prompt) {
            Answer::Choose(i) => {
                assert!(i < items.len(), "choice {} out of range for '{}'", i, prompt);
                Ok(i)
            }
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("expected Choose for '{}', script has {:?}", prompt, other),
        }
    }

    fn input(&mut self, prompt: &str, validate: Validator) -> Result<String> {
        match self.next("input", prompt) {
            Answer::Text(text) => {
                validate(&text)?;
                Ok(text)
            }
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("expected Text for '{}', script has {:?}", prompt, other),
        }
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        match self.next("password", prompt) {
            Answer::Secret(text) => Ok(text),
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("expected Secret for '{}', script has {:?}", prompt, other),
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        match self.next("confirm", prompt) {
            Answer::Yes => Ok(true),
            Answer::No => Ok(false),
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("expected Yes/No for '{}', script has {:?}", prompt, other),
        }
    }
}

/// Simulates kubectl, kubeseal and sops.
///
/// - `kubectl config current-context` prints the simulated context
/// - `kubectl config use-context X` changes it
/// - `kubectl create secret ...` prints a manifest naming the active context
/// - `kubeseal` wraps its stdin in a `SealedSecret` header
/// - `sops -e FILE` prints an `ENC` header followed by the file contents
pub struct FakeRunner {
    pub context: Option<String>,
    pub kubectl_path: Option<PathBuf>,
    /// Invocations whose display contains one of these fail
    pub failing: Vec<String>,
    pub calls: Vec<Invocation>,
}

impl FakeRunner {
    pub fn new(context: &str) -> Self {
        Self {
            context: Some(context.to_string()),
            kubectl_path: None,
            failing: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Runner where no context is configured.
    pub fn without_context() -> Self {
        Self {
            context: None,
            ..Self::new("")
        }
    }

    /// Make every invocation containing `needle` fail.
    pub fn fail_on(mut self, needle: &str) -> Self {
        self.failing.push(needle.to_string());
        self
    }

    /// Contexts switched to, in order.
    pub fn switches(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter(|c| c.args.starts_with(&["config".to_string(), "use-context".to_string()]))
            .map(|c| c.args[2].clone())
            .collect()
    }

    /// Calls to a given program.
    pub fn calls_to(&self, program: &str) -> Vec<&Invocation> {
        self.calls.iter().filter(|c| c.program == program).collect()
    }

    fn fail(invocation: &Invocation) -> Error {
        CommandError::Failed {
            command: invocation.display(),
            status: "exit status: 1".to_string(),
            stderr: "simulated failure".to_string(),
        }
        .into()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<Vec<u8>> {
        self.calls.push(invocation.clone());

        let shown = invocation.display();
        if self.failing.iter().any(|needle| shown.contains(needle.as_str())) {
            return Err(Self::fail(invocation));
        }

        let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
        match (invocation.program.as_str(), args.as_slice()) {
            ("kubectl", ["config", "current-context"]) => match &self.context {
                Some(ctx) => Ok(format!("{}\n", ctx).into_bytes()),
                None => Err(Self::fail(invocation)),
            },
            ("kubectl", ["config", "use-context", ctx]) => {
                self.context = Some(ctx.to_string());
                Ok(format!("Switched to context \"{}\".\n", ctx).into_bytes())
            }
            ("kubectl", ["create", "secret", "generic", name, ..]) => Ok(format!(
                "kind: Secret\nmetadata:\n  name: {}\n# context: {}\n",
                name,
                self.context.clone().unwrap_or_default()
            )
            .into_bytes()),
            ("kubeseal", _) => {
                let mut out = b"kind: SealedSecret\n".to_vec();
                out.extend(invocation.stdin.clone().unwrap_or_default());
                Ok(out)
            }
            ("sops", ["-e", file]) => {
                let plain = std::fs::read(file)?;
                let mut out = b"# ENC[sops]\n".to_vec();
                out.extend(plain);
                Ok(out)
            }
            _ => panic!("unexpected command: {}", shown),
        }
    }

    fn which(&self, _program: &str) -> Option<PathBuf> {
        self.kubectl_path.clone()
    }
}
