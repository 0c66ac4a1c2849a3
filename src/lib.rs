//! Switchyard - a C# compiler driver
//!
//! Given a compilation unit, this crate picks the backend compiler (the
//! project's universal compiler, or the host's default one when that is
//! missing), composes its exact argument list and runs it.
//!
//! ```rust,no_run
//! use switchyard::{CompilationUnit, CompilerDriver, DriverConfig, MonoInstallation};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DriverConfig::load_for_project(std::path::Path::new("."));
//! let mono = MonoInstallation::detect().ok_or("mono not found")?;
//! let driver = CompilerDriver::new(config, mono);
//!
//! let unit = CompilationUnit::builder("Library/Game.dll")
//!     .sources(["Assets/Player.cs", "Assets/Enemy.cs"])
//!     .define("DEBUG")
//!     .build()?;
//! let outcome = driver.compile(&unit)?;
//! for warning in &outcome.warnings {
//!     eprint!("{}", warning);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides mock implementations of the filesystem probe and the process
/// runner.
#[cfg(test)]
pub mod test_support;

pub use builder::{
    ArgumentComposer, BaseCompilerBehavior, CommandSpec, CompileOutcome, CompilerDriver,
    Composition, MonoInstallation, PreparedCompile, ProviderRegistry, ToolchainDescriptor,
    ToolchainKind, ToolchainProvider, ToolchainSelector,
};
pub use crate::core::{ApiProfile, CompilationUnit, Epoch, RuntimeVersion, TargetEnvironment};
pub use util::{Diagnostic, DriverConfig, DriverError, FileProbe, ProcessOutput, ProcessRunner};
