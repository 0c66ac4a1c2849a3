//! Provider registry - explicit registration of compiler providers.
//!
//! Hosts build a registry, register the providers they want and pass it
//! around by value. Registering a provider for a language that already has
//! one replaces it, which is how a host swaps its built-in C# compiler for
//! the driver.

use std::collections::HashMap;

use crate::builder::driver::{CompileOutcome, CompilerDriver};
use crate::core::unit::CompilationUnit;
use crate::util::diagnostic::DriverError;

/// Language name the driver registers under.
pub const CSHARP: &str = "csharp";

/// Something that can compile units of one language.
pub trait ToolchainProvider: Send + Sync {
    /// Language this provider compiles (e.g. "csharp").
    fn language(&self) -> &str;

    /// Compile a unit.
    fn compile(&self, unit: &CompilationUnit) -> Result<CompileOutcome, DriverError>;
}

impl ToolchainProvider for CompilerDriver {
    fn language(&self) -> &str {
        CSHARP
    }

    fn compile(&self, unit: &CompilationUnit) -> Result<CompileOutcome, DriverError> {
        CompilerDriver::compile(self, unit)
    }
}

/// Registry of compiler providers, keyed by language.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn ToolchainProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ProviderRegistry {
            providers: HashMap::new(),
        }
    }

    /// Register a provider, returning the one it replaced.
    pub fn register(
        &mut self,
        provider: Box<dyn ToolchainProvider>,
    ) -> Option<Box<dyn ToolchainProvider>> {
        let language = provider.language().to_string();
        let replaced = self.providers.insert(language.clone(), provider);
        if replaced.is_some() {
            tracing::debug!("replaced provider for `{}`", language);
        }
        replaced
    }

    /// Get the provider for a language.
    pub fn get(&self, language: &str) -> Option<&dyn ToolchainProvider> {
        self.providers.get(language).map(|p| p.as_ref())
    }

    /// Compile a unit with the provider registered for `language`.
    pub fn compile(
        &self,
        language: &str,
        unit: &CompilationUnit,
    ) -> Result<CompileOutcome, DriverError> {
        let provider = self
            .get(language)
            .ok_or_else(|| DriverError::UnknownLanguage {
                language: language.to_string(),
            })?;
        provider.compile(unit)
    }

    /// Registered language names, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
