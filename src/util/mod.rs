//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod process;

pub use config::DriverConfig;
pub use diagnostic::{Diagnostic, DriverError};
pub use fs::{FileProbe, RealFileSystem};
pub use process::{ProcessOutput, ProcessRunner, SystemRunner};
