//! Toolchain selection.
//!
//! Selection is a pure existence probe: the primary compiler is used when
//! its executable sits at the configured location under the base path, and
//! the host's default compiler otherwise. A missing primary compiler is an
//! expected outcome, never an error.

use std::path::{Path, PathBuf};

use crate::core::unit::CompilationUnit;
use crate::util::config::DriverConfig;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::fs::FileProbe;

use super::{BaseCompilerBehavior, ToolchainDescriptor};

/// Chooses the backend for a compilation unit.
pub struct ToolchainSelector<'a> {
    config: &'a DriverConfig,
    probe: &'a dyn FileProbe,
    behavior: &'a dyn BaseCompilerBehavior,
}

impl<'a> ToolchainSelector<'a> {
    pub fn new(
        config: &'a DriverConfig,
        probe: &'a dyn FileProbe,
        behavior: &'a dyn BaseCompilerBehavior,
    ) -> Self {
        ToolchainSelector {
            config,
            probe,
            behavior,
        }
    }

    /// Where the primary compiler is expected under `base_path`.
    pub fn primary_path(&self, base_path: &Path) -> PathBuf {
        base_path.join(&self.config.primary_compiler)
    }

    /// Fixed response-file names, in the order the legacy epoch tries them:
    /// the configured name, then one named after the default compiler.
    pub fn response_file_candidates(&self) -> Vec<String> {
        let mut candidates = vec![self.config.response_file.clone()];
        let derived = format!("{}.rsp", self.behavior.compiler_stem());
        if !candidates.contains(&derived) {
            candidates.push(derived);
        }
        candidates
    }

    /// Pick the backend for `unit`.
    ///
    /// The caller is responsible for surfacing [`fallback_warning`] when
    /// the fallback backend is returned.
    pub fn select(&self, base_path: &Path, unit: &CompilationUnit) -> ToolchainDescriptor {
        let candidates = self.response_file_candidates();
        let primary = self.primary_path(base_path);

        if self.probe.exists(&primary) {
            tracing::debug!(
                "primary compiler found at {} (target: {})",
                primary.display(),
                unit.target()
            );
            ToolchainDescriptor::primary(primary, candidates)
        } else {
            tracing::debug!(
                "no primary compiler at {} (target: {})",
                primary.display(),
                unit.target()
            );
            ToolchainDescriptor::fallback(candidates)
        }
    }
}

/// Warning emitted when the default compiler is used instead of the
/// primary one.
pub fn fallback_warning(expected: &Path) -> Diagnostic {
    Diagnostic::warning(
        "Universal C# compiler not found in project directory. Use the default compiler",
    )
    .with_location(expected)
    .with_suggestion(suggestions::INSTALL_PRIMARY)
}
