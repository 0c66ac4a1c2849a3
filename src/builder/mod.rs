//! C# compiler driver.
//!
//! This module implements toolchain selection, argument composition and
//! compiler invocation.

pub mod args;
pub mod driver;
pub mod registry;
pub mod toolchain;

pub use args::{ArgumentComposer, Composition};
pub use driver::{CompileOutcome, CompilerDriver, PreparedCompile};
pub use registry::{ProviderRegistry, ToolchainProvider};
pub use toolchain::{
    BaseCompilerBehavior, CommandSpec, MonoInstallation, ToolchainDescriptor, ToolchainKind,
    ToolchainSelector,
};
