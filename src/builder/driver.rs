//! The compiler driver: selection, composition and invocation for one
//! compilation unit.
//!
//! Every call computes its probes and arguments from scratch. The driver
//! holds only immutable configuration and shared collaborators, so a host
//! may compile independent units from several threads at once.

use std::path::Path;
use std::sync::Arc;

use crate::builder::args::{quote_path, ArgumentComposer, Composition};
use crate::builder::toolchain::{
    fallback_warning, BaseCompilerBehavior, CommandSpec, ToolchainDescriptor, ToolchainSelector,
};
use crate::core::epoch::Epoch;
use crate::core::unit::CompilationUnit;
use crate::util::config::DriverConfig;
use crate::util::diagnostic::{Diagnostic, DriverError};
use crate::util::fs::{FileProbe, RealFileSystem};
use crate::util::process::{ProcessOutput, ProcessRunner, SystemRunner};

/// A fully composed compiler command, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCompile {
    /// Backend that will run
    pub toolchain: ToolchainDescriptor,
    /// Program, leading launcher arguments and composed arguments
    pub command: CommandSpec,
    /// Warnings raised during selection and composition
    pub warnings: Vec<Diagnostic>,
}

/// A successful compile.
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    pub toolchain: ToolchainDescriptor,
    pub command: CommandSpec,
    pub output: ProcessOutput,
    pub warnings: Vec<Diagnostic>,
}

/// Compiles units into libraries with the primary or fallback compiler.
#[derive(Clone)]
pub struct CompilerDriver {
    config: DriverConfig,
    probe: Arc<dyn FileProbe>,
    behavior: Arc<dyn BaseCompilerBehavior>,
    runner: Arc<dyn ProcessRunner>,
}

impl CompilerDriver {
    /// Create a driver over the real filesystem and real processes.
    pub fn new(config: DriverConfig, behavior: impl BaseCompilerBehavior + 'static) -> Self {
        CompilerDriver {
            config,
            probe: Arc::new(RealFileSystem),
            behavior: Arc::new(behavior),
            runner: Arc::new(SystemRunner),
        }
    }

    /// Replace the filesystem probe.
    pub fn with_probe(mut self, probe: impl FileProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    /// Replace the process runner.
    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Arc::new(runner);
        self
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Pick the backend for `unit`, probing under `base_path`.
    pub fn select_toolchain(
        &self,
        base_path: &Path,
        unit: &CompilationUnit,
    ) -> ToolchainDescriptor {
        ToolchainSelector::new(&self.config, self.probe.as_ref(), self.behavior.as_ref())
            .select(base_path, unit)
    }

    /// Compose the argument list for `unit` under `epoch`.
    pub fn compose_arguments(
        &self,
        unit: &CompilationUnit,
        epoch: Epoch,
        toolchain: &ToolchainDescriptor,
    ) -> Composition {
        ArgumentComposer::new(&self.config, self.probe.as_ref(), self.behavior.as_ref())
            .compose(unit, epoch, toolchain)
    }

    /// Select a backend and compose the full command, without running it.
    pub fn prepare(&self, unit: &CompilationUnit) -> Result<PreparedCompile, DriverError> {
        let selector =
            ToolchainSelector::new(&self.config, self.probe.as_ref(), self.behavior.as_ref());
        let base_path = &self.config.project_root;

        let mut warnings = Vec::new();
        let selected = selector.select(base_path, unit);
        if !selected.is_primary() {
            let diag = fallback_warning(&selector.primary_path(base_path));
            diag.emit();
            warnings.push(diag);
        }

        let Composition {
            toolchain,
            mut args,
            warnings: composed,
        } = self.compose_arguments(unit, self.config.epoch, &selected);
        warnings.extend(composed);

        let command = match toolchain.executable {
            Some(ref executable) if toolchain.is_primary() => {
                if let Some(ref prefix) = self.config.process_id_define {
                    // The response file stays last.
                    let at = args
                        .iter()
                        .rposition(|a| a.starts_with('@'))
                        .unwrap_or(args.len());
                    args.insert(at, format!("-define:{}{}", prefix, std::process::id()));
                }
                match self.config.launcher {
                    Some(ref launcher) => CommandSpec::new(launcher).arg(quote_path(executable)),
                    None => CommandSpec::new(executable),
                }
            }
            _ => self.behavior.default_command()?,
        };

        Ok(PreparedCompile {
            toolchain,
            command: command.args(args).cwd(&self.config.project_root),
            warnings,
        })
    }

    /// Compile `unit`, returning the compiler output on success.
    ///
    /// A compiler that cannot be started or exits unsuccessfully is an
    /// error; the driver never retries.
    pub fn compile(&self, unit: &CompilationUnit) -> Result<CompileOutcome, DriverError> {
        let PreparedCompile {
            toolchain,
            command,
            warnings,
        } = self.prepare(unit)?;

        tracing::info!(
            "compiling target {} with the {} compiler",
            unit.output().display(),
            toolchain.kind
        );

        let output = self
            .runner
            .run(&command)
            .map_err(|e| DriverError::Spawn {
                program: command.program.clone(),
                source: e.into(),
            })?;

        if !output.success() {
            return Err(DriverError::InvocationFailed {
                program: command.program.clone(),
                code: output.code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        tracing::info!("{} build finished", unit.output().display());

        Ok(CompileOutcome {
            toolchain,
            command,
            output,
            warnings,
        })
    }
}

impl std::fmt::Debug for CompilerDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilerDriver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
