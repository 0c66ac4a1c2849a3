//! Test utilities and mocks for unit tests.
//!
//! This module provides mock implementations of the driver's collaborators:
//! an in-memory filesystem for existence probes and a recording process
//! runner.
//!
//! # Example
//!
//! ```rust,ignore
//! use switchyard::test_support::{MockFileSystem, MockExecutor, MockProcessOutput};
//!
//! #[test]
//! fn test_example() {
//!     let mut fs = MockFileSystem::new();
//!     fs.add_file("/project/mcs.rsp", "-warnaserror");
//!
//!     let exec = MockExecutor::new();
//!     exec.expect_contains("mcs.exe", MockProcessOutput::success(""));
//!
//!     // Hand both to a CompilerDriver...
//! }
//! ```

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::builder::toolchain::CommandSpec;
use crate::util::fs::FileProbe;
use crate::util::process::{ProcessOutput, ProcessRunner};

pub use fixtures::*;

/// Mock filesystem for testing without real I/O.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        MockFileSystem::default()
    }

    /// Add a file with the given content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, content.into());
    }

    /// Add a directory and all of its parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Remove a file.
    pub fn remove_file(&mut self, path: &Path) -> Result<()> {
        if self.files.remove(path).is_none() {
            bail!("file not found: {}", path.display());
        }
        Ok(())
    }

    /// Check if a path is a file.
    pub fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Check if a path is a directory.
    pub fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}

impl FileProbe for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path)
    }
}

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Create an output with both stdout and stderr.
    pub fn with_output(status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

impl From<MockProcessOutput> for ProcessOutput {
    fn from(mock: MockProcessOutput) -> Self {
        ProcessOutput {
            code: Some(mock.status),
            stdout: mock.stdout,
            stderr: mock.stderr,
        }
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match using a regex pattern.
    Regex(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(cmd))
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Default)]
struct ExecutorState {
    expectations: Vec<(CommandPattern, MockProcessOutput)>,
    calls: Vec<String>,
    default_output: Option<MockProcessOutput>,
    fail_spawn: bool,
}

/// Mock process runner that records every command it is asked to run.
///
/// Clones share state, so a test can keep one handle and give another to
/// the driver.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<ExecutorState>>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.expect_pattern(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&self, substring: &str, output: MockProcessOutput) -> &Self {
        self.expect_pattern(CommandPattern::Contains(substring.to_string()), output)
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&self, pattern: CommandPattern, output: MockProcessOutput) -> &Self {
        self.state.lock().unwrap().expectations.push((pattern, output));
        self
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&self, output: MockProcessOutput) -> &Self {
        self.state.lock().unwrap().default_output = Some(output);
        self
    }

    /// Make every run fail as if the program could not be started.
    pub fn fail_spawn(&self) -> &Self {
        self.state.lock().unwrap().fail_spawn = true;
        self
    }

    /// Get all commands that were run.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl ProcessRunner for MockExecutor {
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput> {
        let mut parts = vec![command.program.display().to_string()];
        parts.extend(command.args.iter().cloned());
        let full_cmd = parts.join(" ");

        let mut state = self.state.lock().unwrap();
        state.calls.push(full_cmd.clone());

        if state.fail_spawn {
            bail!("failed to spawn `{}`", command.program.display());
        }

        if let Some((_, output)) = state
            .expectations
            .iter()
            .find(|(pattern, _)| pattern.matches(&full_cmd))
        {
            return Ok(output.clone().into());
        }

        if let Some(ref default) = state.default_output {
            return Ok(default.clone().into());
        }

        bail!("unexpected command: {}", full_cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_files_are_probed() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/project/Assets/mcs.rsp", "");

        assert!(FileProbe::exists(&fs, Path::new("/project/Assets/mcs.rsp")));
        assert!(!FileProbe::exists(&fs, Path::new("/project/Assets")));
        assert!(fs.is_dir(Path::new("/project")));

        fs.remove_file(Path::new("/project/Assets/mcs.rsp")).unwrap();
        assert!(!fs.is_file(Path::new("/project/Assets/mcs.rsp")));
    }

    #[test]
    fn test_mock_executor_matches_in_order() {
        let exec = MockExecutor::new();
        exec.expect("mcs -version", MockProcessOutput::success("Mono C# compiler"));
        exec.expect_pattern(
            CommandPattern::Regex(r"-out:.*\.dll".to_string()),
            MockProcessOutput::failure(1, "error"),
        );

        let out = exec.run(&CommandSpec::new("mcs").arg("-version")).unwrap();
        assert_eq!(out.stdout, "Mono C# compiler");

        let out = exec.run(&CommandSpec::new("mcs").arg("-out:Lib.dll")).unwrap();
        assert_eq!(out.code, Some(1));

        assert!(exec.run(&CommandSpec::new("csc")).is_err());
        assert_eq!(exec.calls().len(), 3);
    }
}
