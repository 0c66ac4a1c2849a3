//! Toolchain abstraction for the C# compiler backends.
//!
//! Two backends can handle a compilation unit:
//! 1. The primary ("universal") compiler shipped with the project
//! 2. The host's default compiler, used when the primary one is missing
//!
//! Selection lives in [`select`]; the host-provided pieces the driver needs
//! are described by [`BaseCompilerBehavior`].

use std::path::{Path, PathBuf};

use crate::core::unit::ApiProfile;
use crate::util::diagnostic::DriverError;

mod mono;
mod select;

pub use mono::MonoInstallation;
pub use select::{fallback_warning, ToolchainSelector};

/// Which backend handles a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolchainKind {
    /// The project's universal compiler
    Primary,
    /// The host's default compiler
    Fallback,
}

impl ToolchainKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainKind::Primary => "primary",
            ToolchainKind::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ToolchainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of toolchain selection for one compile request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainDescriptor {
    /// Selected backend
    pub kind: ToolchainKind,
    /// Probed primary executable; `None` for the fallback backend, whose
    /// executable comes from the host.
    pub executable: Option<PathBuf>,
    /// Fixed response-file names the legacy epoch tries, in order
    pub response_file_candidates: Vec<String>,
}

impl ToolchainDescriptor {
    pub fn primary(executable: impl Into<PathBuf>, candidates: Vec<String>) -> Self {
        ToolchainDescriptor {
            kind: ToolchainKind::Primary,
            executable: Some(executable.into()),
            response_file_candidates: candidates,
        }
    }

    pub fn fallback(candidates: Vec<String>) -> Self {
        ToolchainDescriptor {
            kind: ToolchainKind::Fallback,
            executable: None,
            response_file_candidates: candidates,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.kind == ToolchainKind::Primary
    }

    /// The same descriptor, demoted to the fallback backend.
    pub fn into_fallback(self) -> Self {
        ToolchainDescriptor::fallback(self.response_file_candidates)
    }
}

/// A command to execute.
///
/// `args` are command-line tokens, not raw argv entries: a path is a
/// double-quoted token (see [`quote_path`]) and the quoting is resolved when
/// the process is spawned.
///
/// [`quote_path`]: crate::builder::args::quote_path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to run (e.g., "mono", "mcs")
    pub program: PathBuf,
    /// Command-line tokens
    pub args: Vec<String>,
    /// Working directory
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

/// Operations the driver needs from the host's own compiler integration.
///
/// Hosts implement this once and hand it to the driver; nothing here is
/// looked up behind the host's back.
pub trait BaseCompilerBehavior: Send + Sync {
    /// Framework references the profile needs, relative to its reference
    /// directory (e.g. `System.Xml.Linq.dll`).
    fn additional_references(&self, profile: ApiProfile) -> Vec<String>;

    /// Class library directory for a profile.
    fn profile_directory(&self, profile: ApiProfile) -> PathBuf;

    /// Directory that holds named reference profiles such as `2.0-api`.
    fn reference_root(&self) -> PathBuf;

    /// The host's default compiler command, without unit arguments.
    fn default_command(&self) -> Result<CommandSpec, DriverError>;

    /// File stem of the default compiler (e.g. `mcs`).
    fn compiler_stem(&self) -> String;
}
