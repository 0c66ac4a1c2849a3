//! Mono installation layout.
//!
//! Hosts that ship Mono keep two installations side by side: the classic
//! one holding the 2.0-era profiles and a "bleeding edge" one holding the
//! 4.x profiles, the `2.0-api` reference assemblies and the `mcs` compiler.

use std::path::{Path, PathBuf};

use crate::builder::args::quote_path;
use crate::core::unit::ApiProfile;
use crate::util::diagnostic::DriverError;
use crate::util::process::find_executable;

use super::{BaseCompilerBehavior, CommandSpec};

/// Framework references every profile asks for by default.
pub const DEFAULT_ADDITIONAL_REFERENCES: &[&str] =
    &["System.Runtime.Serialization.dll", "System.Xml.Linq.dll"];

/// A [`BaseCompilerBehavior`] backed by an on-disk Mono layout.
#[derive(Debug, Clone)]
pub struct MonoInstallation {
    classic: PathBuf,
    bleeding_edge: PathBuf,
    references: Vec<String>,
}

impl MonoInstallation {
    /// Create an installation from its two roots.
    pub fn new(classic: impl Into<PathBuf>, bleeding_edge: impl Into<PathBuf>) -> Self {
        MonoInstallation {
            classic: classic.into(),
            bleeding_edge: bleeding_edge.into(),
            references: DEFAULT_ADDITIONAL_REFERENCES
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }

    /// Use a single root for both installations.
    pub fn single(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        MonoInstallation::new(root.clone(), root)
    }

    /// Replace the additional reference list.
    pub fn with_references(
        mut self,
        references: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    /// Locate an installation.
    ///
    /// Tries, in order:
    /// 1. The `MONO_PREFIX` environment variable
    /// 2. The prefix of `mcs` found on PATH (`<prefix>/bin/mcs`)
    pub fn detect() -> Option<Self> {
        if let Ok(prefix) = std::env::var("MONO_PREFIX") {
            if !prefix.is_empty() {
                tracing::debug!("using MONO_PREFIX={}", prefix);
                return Some(MonoInstallation::single(prefix));
            }
        }

        let mcs = find_executable("mcs")?;
        let prefix = mcs.parent()?.parent()?;
        tracing::debug!("found mcs at {}", mcs.display());
        Some(MonoInstallation::single(prefix))
    }

    fn lib_mono(root: &Path) -> PathBuf {
        root.join("lib").join("mono")
    }

    /// Folder name of a profile's class libraries.
    pub fn profile_folder(profile: ApiProfile) -> &'static str {
        match profile {
            ApiProfile::Net20 => "2.0",
            ApiProfile::Net20Subset => "unity",
            ApiProfile::Net46 => "4.5",
        }
    }

    /// Path of the default compiler assembly.
    pub fn compiler_assembly(&self) -> PathBuf {
        Self::lib_mono(&self.bleeding_edge).join("4.5").join("mcs.exe")
    }

    /// Path of the runtime used to launch the compiler.
    pub fn runtime(&self) -> PathBuf {
        let name = if cfg!(windows) { "mono.exe" } else { "mono" };
        self.bleeding_edge.join("bin").join(name)
    }
}

impl BaseCompilerBehavior for MonoInstallation {
    fn additional_references(&self, _profile: ApiProfile) -> Vec<String> {
        self.references.clone()
    }

    fn profile_directory(&self, profile: ApiProfile) -> PathBuf {
        // Only the 4.x profile moved to the bleeding-edge installation.
        let root = match profile {
            ApiProfile::Net46 => &self.bleeding_edge,
            ApiProfile::Net20 | ApiProfile::Net20Subset => &self.classic,
        };
        Self::lib_mono(root).join(Self::profile_folder(profile))
    }

    fn reference_root(&self) -> PathBuf {
        Self::lib_mono(&self.bleeding_edge)
    }

    fn default_command(&self) -> Result<CommandSpec, DriverError> {
        let assembly = self.compiler_assembly();
        if !assembly.is_file() {
            return Err(DriverError::NoFallbackCompiler {
                reason: format!("{} does not exist", assembly.display()),
            });
        }
        Ok(CommandSpec::new(self.runtime()).arg(quote_path(&assembly)))
    }

    fn compiler_stem(&self) -> String {
        "mcs".to_string()
    }
}
