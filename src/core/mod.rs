//! Core data model.

pub mod epoch;
pub mod unit;

pub use epoch::{Epoch, RuntimeVersion};
pub use unit::{ApiProfile, CompilationUnit, TargetEnvironment, UnitBuilder, UnitManifest};
