//! Driver errors and user-facing diagnostics.
//!
//! Hard failures are [`DriverError`]s. Soft outcomes (a fallback compiler
//! was chosen, an obsolete response file was used) are [`Diagnostic`]s that
//! travel with the result so the host can show them however it likes.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages for consistent warnings.
pub mod suggestions {
    /// Suggestion when the primary compiler is missing.
    pub const INSTALL_PRIMARY: &str =
        "help: Place the universal compiler under the configured `primary_compiler` path";
}

/// A non-fatal warning with optional suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            "\x1b[1;33mwarning\x1b[0m"
        } else {
            "warning"
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for suggestion in &self.suggestions {
            output.push_str(&format!("  {}\n", suggestion));
        }

        output
    }

    /// Log the warning through `tracing`.
    pub fn emit(&self) {
        match self.location {
            Some(ref path) => tracing::warn!(location = %path.display(), "{}", self.message),
            None => tracing::warn!("{}", self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Errors surfaced to the host.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum DriverError {
    /// The compilation unit is missing or has malformed required fields.
    #[error("invalid compilation unit: {field}: {reason}")]
    #[diagnostic(code(switchyard::config::invalid))]
    ConfigurationInvalid { field: String, reason: String },

    /// A driver configuration file could not be read.
    #[error("failed to read driver config: {}", path.display())]
    #[diagnostic(code(switchyard::config::load))]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A driver configuration file is not valid TOML for [`DriverConfig`].
    ///
    /// [`DriverConfig`]: crate::util::config::DriverConfig
    #[error("failed to parse driver config: {}", path.display())]
    #[diagnostic(
        code(switchyard::config::parse),
        help("Check the file against the documented `[driver]` keys")
    )]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The host could not provide a default compiler to fall back to.
    #[error("no fallback compiler available: {reason}")]
    #[diagnostic(
        code(switchyard::toolchain::no_fallback),
        help("Install Mono or set MONO_PREFIX so the default compiler can be found")
    )]
    NoFallbackCompiler { reason: String },

    /// No provider is registered for the requested language.
    #[error("no compiler provider registered for `{language}`")]
    #[diagnostic(code(switchyard::registry::unknown_language))]
    UnknownLanguage { language: String },

    /// The compiler process could not be started.
    #[error("failed to start `{}`", program.display())]
    #[diagnostic(code(switchyard::invoke::spawn))]
    Spawn {
        program: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The compiler ran and reported failure.
    #[error("`{}` exited with {}", program.display(), display_code(*code))]
    #[diagnostic(
        code(switchyard::invoke::failed),
        help("Check the compiler output for the first error")
    )]
    InvocationFailed {
        program: PathBuf,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn display_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl DriverError {
    /// Shorthand for [`DriverError::ConfigurationInvalid`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DriverError::ConfigurationInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
