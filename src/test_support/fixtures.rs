//! Test fixtures for common test scenarios.

use std::path::PathBuf;

use crate::builder::toolchain::{BaseCompilerBehavior, CommandSpec};
use crate::core::unit::{ApiProfile, CompilationUnit, TargetEnvironment};
use crate::util::diagnostic::DriverError;

/// Host behavior with a fixed layout rooted at `/mono`.
///
/// - reference root: `/mono/lib/mono`
/// - profile directory: `/mono/lib/mono/<profile>`
/// - default compiler: `/mono/bin/mono /mono/lib/mono/4.5/mcs.exe`
#[derive(Debug, Clone)]
pub struct StubBehavior {
    references: Vec<String>,
    stem: String,
    has_default_compiler: bool,
}

impl StubBehavior {
    pub fn new() -> Self {
        StubBehavior {
            references: vec!["System.Xml.Linq.dll".to_string()],
            stem: "mcs".to_string(),
            has_default_compiler: true,
        }
    }

    pub fn with_references(
        mut self,
        references: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = stem.into();
        self
    }

    pub fn without_default_compiler(mut self) -> Self {
        self.has_default_compiler = false;
        self
    }
}

impl Default for StubBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseCompilerBehavior for StubBehavior {
    fn additional_references(&self, _profile: ApiProfile) -> Vec<String> {
        self.references.clone()
    }

    fn profile_directory(&self, profile: ApiProfile) -> PathBuf {
        self.reference_root().join(profile.as_str())
    }

    fn reference_root(&self) -> PathBuf {
        PathBuf::from("/mono/lib/mono")
    }

    fn default_command(&self) -> Result<CommandSpec, DriverError> {
        if !self.has_default_compiler {
            return Err(DriverError::NoFallbackCompiler {
                reason: "stub has no default compiler".to_string(),
            });
        }
        Ok(CommandSpec::new("/mono/bin/mono").arg("\"/mono/lib/mono/4.5/mcs.exe\""))
    }

    fn compiler_stem(&self) -> String {
        self.stem.clone()
    }
}

/// A small editor unit with two sources and one reference.
pub fn unit_fixture() -> CompilationUnit {
    CompilationUnit::builder("Library/Scripts/Game.dll")
        .sources(["Assets/Player.cs", "Assets/Enemy.cs"])
        .reference("Library/Engine.dll")
        .define("DEBUG")
        .target(TargetEnvironment::Editor)
        .build()
        .expect("fixture unit is valid")
}
