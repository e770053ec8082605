//! External command execution.
//!
//! Every call to kubectl, kubeseal and sops goes through [`CommandRunner`],
//! so the wizard can be driven against a scripted runner in tests.
//!
//! Commands are spawned directly with an argument vector. Nothing is passed
//! through a shell, so secret values are never shell-interpreted.

use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::error::{CommandError, Result};

const REDACTED: &str = "***";

/// A single external command: program, arguments and optional stdin.
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
    /// Argument index and length of its visible prefix, for secret arguments
    secrets: Vec<(usize, usize)>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            secrets: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Feed `input` to the process on stdin.
    pub fn stdin(mut self, input: Vec<u8>) -> Self {
        self.stdin = Some(input);
        self
    }

    /// Append `prefix` followed by `secret` as one argument.
    ///
    /// Only `prefix` is shown when the invocation is displayed.
    pub fn secret_arg(mut self, prefix: &str, secret: &str) -> Self {
        self.secrets.push((self.args.len(), prefix.len()));
        self.args.push(format!("{}{}", prefix, secret));
        self
    }

    /// Command line suitable for logs and error messages.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for (index, arg) in self.args.iter().enumerate() {
            line.push(' ');
            match self.secrets.iter().find(|(i, _)| *i == index) {
                Some(&(_, visible)) => {
                    line.push_str(arg.get(..visible).unwrap_or_default());
                    line.push_str(REDACTED);
                }
                None => line.push_str(arg),
            }
        }
        line
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("command", &self.display())
            .field("stdin_len", &self.stdin.as_ref().map(Vec::len))
            .finish()
    }
}

/// Runs external commands.
pub trait CommandRunner {
    /// Run to completion and return stdout.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Spawn` if the program cannot be started and
    /// `CommandError::Failed` if it exits unsuccessfully.
    fn run(&mut self, invocation: &Invocation) -> Result<Vec<u8>>;

    /// Resolve a program on `PATH`.
    fn which(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    /// Run and return stdout as trimmed text.
    fn run_text(&mut self, invocation: &Invocation) -> Result<String> {
        let stdout = self.run(invocation)?;
        let text = String::from_utf8(stdout).map_err(|_| CommandError::InvalidOutput {
            command: invocation.display(),
        })?;
        Ok(text.trim().to_string())
    }
}

/// Runs commands as child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<Vec<u8>> {
        debug!(command = %invocation.display(), "running");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| CommandError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        if let (Some(input), Some(mut stdin)) = (&invocation.stdin, child.stdin.take()) {
            // A child that exits early closes stdin; its exit status is reported below.
            match stdin.write_all(input) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!(command = %invocation.display(), "stdin closed early");
                }
                other => other?,
            }
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CommandError::Failed {
                command: invocation.display(),
                status: output.status.to_string(),
                stderr,
            }
            .into());
        }

        trace!(stdout_len = output.stdout.len(), "command finished");
        Ok(output.stdout)
    }
}
