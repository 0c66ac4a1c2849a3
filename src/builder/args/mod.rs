//! Compiler argument composition.
//!
//! Produces the exact, ordered token list handed to the selected backend:
//!
//! ```text
//! -debug -target:library -nowarn:0169 [-langversion:N] -out:"<out>" -unsafe [-optimize]
//! -r:"<ref>"... -define:<sym>... "<src>"... -r:"<implicit>"... [@"<rsp>"]
//! ```
//!
//! Bracketed tokens depend on the [`Epoch`] and the unit. Composition reads
//! the filesystem but never fails and never mutates its inputs, so the same
//! unit over the same filesystem always yields the same tokens.

use std::iter;
use std::path::Path;

use crate::builder::toolchain::{BaseCompilerBehavior, ToolchainDescriptor};
use crate::core::epoch::Epoch;
use crate::core::unit::CompilationUnit;
use crate::util::config::DriverConfig;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::fs::FileProbe;

pub mod references;
pub mod response;

/// Warning disabled on every compile (field assigned but never used).
pub const DISABLED_WARNING: &str = "0169";

/// Render a path as a single command-line token.
///
/// The result is always wrapped in double quotes, so paths with whitespace
/// stay one token. Embedded quotes and the backslashes in front of them are
/// escaped so [`unquote_token`] gives back the path. On Windows separators
/// are normalized to `/`.
///
/// [`unquote_token`]: crate::util::process::unquote_token
pub fn quote_path(path: &Path) -> String {
    let text = path.to_string_lossy();
    let text = if cfg!(windows) {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    };

    let mut token = String::with_capacity(text.len() + 2);
    token.push('"');
    let mut backslashes = 0;
    for c in text.chars() {
        if c == '\\' {
            backslashes += 1;
            continue;
        }
        let run = if c == '"' { backslashes * 2 + 1 } else { backslashes };
        token.extend(iter::repeat('\\').take(run));
        token.push(c);
        backslashes = 0;
    }
    token.extend(iter::repeat('\\').take(backslashes * 2));
    token.push('"');
    token
}

/// Result of composing arguments for one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Backend that will run, after the executable re-check
    pub toolchain: ToolchainDescriptor,
    /// Ordered argument tokens
    pub args: Vec<String>,
    /// Non-fatal issues found while composing
    pub warnings: Vec<Diagnostic>,
}

impl Composition {
    /// The value of the `-out:` token, as passed to the compiler.
    pub fn output_token(&self) -> Option<&str> {
        self.args.iter().find_map(|arg| arg.strip_prefix("-out:"))
    }
}

/// Builds argument lists for the selected backend.
pub struct ArgumentComposer<'a> {
    config: &'a DriverConfig,
    probe: &'a dyn FileProbe,
    behavior: &'a dyn BaseCompilerBehavior,
}

impl<'a> ArgumentComposer<'a> {
    pub fn new(
        config: &'a DriverConfig,
        probe: &'a dyn FileProbe,
        behavior: &'a dyn BaseCompilerBehavior,
    ) -> Self {
        ArgumentComposer {
            config,
            probe,
            behavior,
        }
    }

    /// Compose the argument list for `unit` under `epoch`.
    pub fn compose(
        &self,
        unit: &CompilationUnit,
        epoch: Epoch,
        toolchain: &ToolchainDescriptor,
    ) -> Composition {
        let mut warnings = Vec::new();
        let toolchain = self.recheck(toolchain.clone(), &mut warnings);

        let mut args = vec![
            "-debug".to_string(),
            "-target:library".to_string(),
            format!("-nowarn:{}", DISABLED_WARNING),
        ];

        if epoch == Epoch::Current {
            args.push(format!(
                "-langversion:{}",
                self.config.runtime_version.lang_version()
            ));
        }

        args.push(format!("-out:{}", quote_path(unit.output())));
        args.push("-unsafe".to_string());

        if epoch == Epoch::Current && unit.wants_optimization() {
            args.push("-optimize".to_string());
        }

        for reference in unit.references() {
            args.push(format!("-r:{}", quote_path(reference)));
        }

        for define in unit.unique_defines() {
            args.push(format!("-define:{}", define));
        }

        for source in unit.sources() {
            args.push(quote_path(source));
        }

        args.extend(references::implicit_reference_args(
            self.behavior,
            self.probe,
            unit.api_profile(),
        ));

        match epoch {
            Epoch::Current => response::merge_current(
                self.config,
                self.probe,
                unit.api_profile(),
                &mut args,
                &mut warnings,
            ),
            Epoch::Legacy => response::merge_legacy(
                self.config,
                self.probe,
                &toolchain.response_file_candidates,
                &mut args,
            ),
        }

        Composition {
            toolchain,
            args,
            warnings,
        }
    }

    /// Demote a primary toolchain whose executable has vanished since
    /// selection.
    fn recheck(
        &self,
        toolchain: ToolchainDescriptor,
        warnings: &mut Vec<Diagnostic>,
    ) -> ToolchainDescriptor {
        let Some(missing) = toolchain
            .executable
            .clone()
            .filter(|path| toolchain.is_primary() && !self.probe.exists(path))
        else {
            return toolchain;
        };

        let diag = Diagnostic::warning(format!(
            "Universal C# compiler no longer found at {}. Use the default compiler",
            missing.display()
        ))
        .with_location(missing)
        .with_suggestion(suggestions::INSTALL_PRIMARY);
        diag.emit();
        warnings.push(diag);

        toolchain.into_fallback()
    }
}
