//! The compilation unit: one set of sources, references and defines that
//! produces one library artifact.
//!
//! A unit is validated once, when it is built, and is immutable afterwards.
//! Every later stage (selection, composition, invocation) can rely on its
//! invariants without re-checking them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::diagnostic::DriverError;

/// Where the compiled library will execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TargetEnvironment {
    /// Loaded inside the editor
    #[default]
    Editor,
    /// Shipped in a standalone player build
    #[serde(alias = "player")]
    StandalonePlayer,
    /// Shipped to a runtime that only exposes a subset of the class library
    #[serde(alias = "constrained")]
    ConstrainedRuntime,
}

impl TargetEnvironment {
    /// Get the environment name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetEnvironment::Editor => "editor",
            TargetEnvironment::StandalonePlayer => "standalone-player",
            TargetEnvironment::ConstrainedRuntime => "constrained-runtime",
        }
    }

    pub fn is_editor(&self) -> bool {
        matches!(self, TargetEnvironment::Editor)
    }
}

impl std::fmt::Display for TargetEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base class library subset the unit compiles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApiProfile {
    /// Full .NET 2.0 profile (the baseline)
    #[default]
    #[serde(rename = "2.0", alias = "net20")]
    Net20,
    /// Constrained .NET 2.0 subset
    #[serde(rename = "2.0-subset", alias = "net20-subset")]
    Net20Subset,
    /// .NET 4.6 profile
    #[serde(rename = "4.6", alias = "net46")]
    Net46,
}

impl ApiProfile {
    /// Get the profile name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiProfile::Net20 => "2.0",
            ApiProfile::Net20Subset => "2.0-subset",
            ApiProfile::Net46 => "4.6",
        }
    }

    /// The baseline 2.0 profile.
    pub fn is_baseline(&self) -> bool {
        matches!(self, ApiProfile::Net20)
    }

    /// The legacy constrained subset profile.
    pub fn is_legacy_subset(&self) -> bool {
        matches!(self, ApiProfile::Net20Subset)
    }
}

impl std::fmt::Display for ApiProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of what to compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UnitManifest", into = "UnitManifest")]
pub struct CompilationUnit {
    output: PathBuf,
    sources: Vec<PathBuf>,
    references: Vec<PathBuf>,
    defines: Vec<String>,
    target: TargetEnvironment,
    development: bool,
    api_profile: ApiProfile,
}

impl CompilationUnit {
    /// Start building a unit that produces `output`.
    pub fn builder(output: impl Into<PathBuf>) -> UnitBuilder {
        UnitBuilder::new(output)
    }

    /// Path of the produced artifact.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Source files, in caller order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Explicit references, in caller order, duplicates included.
    pub fn references(&self) -> &[PathBuf] {
        &self.references
    }

    /// Defines exactly as supplied, duplicates included.
    pub fn raw_defines(&self) -> &[String] {
        &self.defines
    }

    /// Defines with duplicates removed, keeping the first occurrence.
    pub fn unique_defines(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.defines
            .iter()
            .map(String::as_str)
            .filter(|define| seen.insert(*define))
            .collect()
    }

    pub fn target(&self) -> TargetEnvironment {
        self.target
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    pub fn api_profile(&self) -> ApiProfile {
        self.api_profile
    }

    /// Optimization is off only for development builds loaded by the editor.
    pub fn wants_optimization(&self) -> bool {
        !(self.development && self.target.is_editor())
    }
}

/// Builder for [`CompilationUnit`].
#[derive(Debug, Clone, Default)]
pub struct UnitBuilder {
    output: PathBuf,
    sources: Vec<PathBuf>,
    references: Vec<PathBuf>,
    defines: Vec<String>,
    target: TargetEnvironment,
    development: bool,
    api_profile: ApiProfile,
}

impl UnitBuilder {
    /// Create a new builder for the given output path.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        UnitBuilder {
            output: output.into(),
            ..Default::default()
        }
    }

    /// Add a source file.
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(path.into());
        self
    }

    /// Add multiple source files.
    pub fn sources(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.sources.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add a reference.
    pub fn reference(mut self, path: impl Into<PathBuf>) -> Self {
        self.references.push(path.into());
        self
    }

    /// Add multiple references.
    pub fn references(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.references.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add a preprocessor symbol.
    pub fn define(mut self, symbol: impl Into<String>) -> Self {
        self.defines.push(symbol.into());
        self
    }

    /// Add multiple preprocessor symbols.
    pub fn defines(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.defines.extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn target(mut self, target: TargetEnvironment) -> Self {
        self.target = target;
        self
    }

    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    pub fn api_profile(mut self, profile: ApiProfile) -> Self {
        self.api_profile = profile;
        self
    }

    /// Validate and freeze the unit.
    pub fn build(self) -> Result<CompilationUnit, DriverError> {
        if self.output.as_os_str().is_empty() {
            return Err(DriverError::invalid("output", "output path must not be empty"));
        }

        if let Some(index) = self.sources.iter().position(|p| p.as_os_str().is_empty()) {
            return Err(DriverError::invalid(
                "sources",
                format!("source entry {} is empty", index),
            ));
        }

        if let Some(index) = self.references.iter().position(|p| p.as_os_str().is_empty()) {
            return Err(DriverError::invalid(
                "references",
                format!("reference entry {} is empty", index),
            ));
        }

        for define in &self.defines {
            if define.is_empty() || define.chars().any(|c| c.is_whitespace() || c == ';') {
                return Err(DriverError::invalid(
                    "defines",
                    format!("`{}` is not a valid preprocessor symbol", define),
                ));
            }
        }

        Ok(CompilationUnit {
            output: self.output,
            sources: self.sources,
            references: self.references,
            defines: self.defines,
            target: self.target,
            development: self.development,
            api_profile: self.api_profile,
        })
    }
}

/// Serialized form of a unit, as a host may hand it over in TOML or JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitManifest {
    pub output: PathBuf,
    pub sources: Vec<PathBuf>,
    pub references: Vec<PathBuf>,
    pub defines: Vec<String>,
    pub target: TargetEnvironment,
    pub development: bool,
    pub api_profile: ApiProfile,
}

impl TryFrom<UnitManifest> for CompilationUnit {
    type Error = DriverError;

    fn try_from(m: UnitManifest) -> Result<Self, Self::Error> {
        UnitBuilder::new(m.output)
            .sources(m.sources)
            .references(m.references)
            .defines(m.defines)
            .target(m.target)
            .development(m.development)
            .api_profile(m.api_profile)
            .build()
    }
}

impl From<CompilationUnit> for UnitManifest {
    fn from(unit: CompilationUnit) -> Self {
        UnitManifest {
            output: unit.output,
            sources: unit.sources,
            references: unit.references,
            defines: unit.defines,
            target: unit.target,
            development: unit.development,
            api_profile: unit.api_profile,
        }
    }
}
