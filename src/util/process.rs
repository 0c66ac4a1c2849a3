//! Subprocess execution.

use std::ffi::OsStr;
use std::iter;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};

use crate::builder::toolchain::CommandSpec;

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Create a process builder from a composed command.
    ///
    /// Each command-line token becomes one argv entry with its quoting
    /// resolved, so `-out:"My Lib.dll"` reaches the child as `-out:My Lib.dll`.
    pub fn from_spec(spec: &CommandSpec) -> Self {
        let mut pb = ProcessBuilder::new(&spec.program)
            .args(spec.args.iter().map(|token| unquote_token(token)));
        if let Some(ref cwd) = spec.cwd {
            pb = pb.cwd(cwd);
        }
        pb
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command and wait for completion, capturing output.
    pub fn exec(&self) -> Result<Output> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))?;

        Ok(output)
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Resolve the quoting of one command-line token into its argv value.
///
/// Follows the Windows command-line rules the compilers were written
/// against: `"` toggles quoting and is dropped, `2n` backslashes before a
/// quote become `n` backslashes, `2n + 1` become `n` plus a literal quote,
/// and backslashes anywhere else are literal.
pub fn unquote_token(token: &str) -> String {
    let mut value = String::with_capacity(token.len());
    let mut backslashes = 0;

    for c in token.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                value.extend(iter::repeat('\\').take(backslashes / 2));
                if backslashes % 2 == 1 {
                    value.push('"');
                }
                backslashes = 0;
            }
            _ => {
                value.extend(iter::repeat('\\').take(backslashes));
                backslashes = 0;
                value.push(c);
            }
        }
    }
    value.extend(iter::repeat('\\').take(backslashes));
    value
}

/// Exit status and captured streams of a finished compiler process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<Output> for ProcessOutput {
    fn from(output: Output) -> Self {
        ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs a composed compiler command.
///
/// Returns `Err` only when the process could not be started or waited on.
/// A process that ran and failed is an `Ok` with a non-zero code.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput>;
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput> {
        let pb = ProcessBuilder::from_spec(command);
        tracing::debug!("running `{}`", pb.display_command());
        Ok(pb.exec()?.into())
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
