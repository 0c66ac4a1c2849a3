//! Configuration file support.
//!
//! The driver reads two optional configuration files:
//! - Global: `~/.switchyard/config.toml` - User-wide defaults
//! - Project: `.switchyard/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Every key is
//! optional; anything left unset falls back to the built-in default.
//!
//! ```toml
//! [driver]
//! epoch = "current"
//! runtime_version = "latest"
//! primary_compiler = "Compiler/UniversalCompiler.exe"
//! launcher = "/usr/bin/mono"
//! response_file = "mcs.rsp"
//! response_dir = "Assets"
//! process_id_define = "__UNITY_PROCESSID__"
//! ```
//!
//! An empty `process_id_define` turns the process id define off.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::epoch::{Epoch, RuntimeVersion};
use crate::util::diagnostic::DriverError;

/// Default location of the primary compiler, relative to the base path.
pub const DEFAULT_PRIMARY_COMPILER: &str = "Compiler/UniversalCompiler.exe";

/// Default name of the custom response file.
pub const DEFAULT_RESPONSE_FILE: &str = "mcs.rsp";

/// Symbol prefix the primary compiler reads the host process id from.
pub const DEFAULT_PROCESS_ID_DEFINE: &str = "__UNITY_PROCESSID__";

/// On-disk configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Driver settings
    pub driver: DriverSettings,
}

/// Driver settings as written in a config file. Unset keys are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Flag-assembly generation
    pub epoch: Option<Epoch>,

    /// Scripting runtime the host targets
    pub runtime_version: Option<RuntimeVersion>,

    /// Primary compiler location relative to the base path
    pub primary_compiler: Option<PathBuf>,

    /// Program used to launch managed compiler executables (e.g. mono)
    pub launcher: Option<PathBuf>,

    /// Name of the custom response file
    pub response_file: Option<String>,

    /// Directory holding response files, relative to the project root
    pub response_dir: Option<PathBuf>,

    /// Symbol prefix for the host process id define
    pub process_id_define: Option<String>,
}

impl ConfigFile {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, DriverError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DriverError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| DriverError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file, falling back to defaults if it is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ConfigFile) {
        let (mine, theirs) = (&mut self.driver, other.driver);
        if theirs.epoch.is_some() {
            mine.epoch = theirs.epoch;
        }
        if theirs.runtime_version.is_some() {
            mine.runtime_version = theirs.runtime_version;
        }
        if theirs.primary_compiler.is_some() {
            mine.primary_compiler = theirs.primary_compiler;
        }
        if theirs.launcher.is_some() {
            mine.launcher = theirs.launcher;
        }
        if theirs.response_file.is_some() {
            mine.response_file = theirs.response_file;
        }
        if theirs.response_dir.is_some() {
            mine.response_dir = theirs.response_dir;
        }
        if theirs.process_id_define.is_some() {
            mine.process_id_define = theirs.process_id_define;
        }
    }
}

/// Resolved driver configuration, threaded explicitly into the selector,
/// composer and driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Directory the compiler runs in; response files and the primary
    /// compiler are looked up relative to it.
    pub project_root: PathBuf,
    pub epoch: Epoch,
    pub runtime_version: RuntimeVersion,
    pub primary_compiler: PathBuf,
    pub launcher: Option<PathBuf>,
    pub response_file: String,
    pub response_dir: Option<PathBuf>,
    pub process_id_define: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            project_root: PathBuf::from("."),
            epoch: Epoch::default(),
            runtime_version: RuntimeVersion::default(),
            primary_compiler: PathBuf::from(DEFAULT_PRIMARY_COMPILER),
            launcher: None,
            response_file: DEFAULT_RESPONSE_FILE.to_string(),
            response_dir: None,
            process_id_define: Some(DEFAULT_PROCESS_ID_DEFINE.to_string()),
        }
    }
}

impl DriverConfig {
    /// Defaults rooted at `project_root`.
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        DriverConfig {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    /// Apply file settings on top of the defaults.
    pub fn from_settings(project_root: impl Into<PathBuf>, settings: DriverSettings) -> Self {
        let defaults = DriverConfig::for_project(project_root);
        DriverConfig {
            epoch: settings.epoch.unwrap_or(defaults.epoch),
            runtime_version: settings.runtime_version.unwrap_or(defaults.runtime_version),
            primary_compiler: settings
                .primary_compiler
                .unwrap_or(defaults.primary_compiler),
            launcher: settings.launcher,
            response_file: settings.response_file.unwrap_or(defaults.response_file),
            response_dir: settings.response_dir,
            process_id_define: match settings.process_id_define {
                Some(prefix) if prefix.is_empty() => None,
                Some(prefix) => Some(prefix),
                None => defaults.process_id_define,
            },
            project_root: defaults.project_root,
        }
    }

    /// Load the merged global and project configuration for a project.
    pub fn load_for_project(project_root: &Path) -> Self {
        let project_path = project_config_path(project_root);
        let merged = match global_config_path() {
            Some(global) => load_config(&global, &project_path),
            None => load_config(&PathBuf::new(), &project_path),
        };
        DriverConfig::from_settings(project_root, merged.driver)
    }

    pub fn with_epoch(mut self, epoch: Epoch) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn with_runtime_version(mut self, runtime_version: RuntimeVersion) -> Self {
        self.runtime_version = runtime_version;
        self
    }

    pub fn with_launcher(mut self, launcher: impl Into<PathBuf>) -> Self {
        self.launcher = Some(launcher.into());
        self
    }

    pub fn with_response_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.response_dir = Some(dir.into());
        self
    }

    pub fn with_process_id_define(mut self, prefix: impl Into<String>) -> Self {
        self.process_id_define = Some(prefix.into());
        self
    }

    pub fn without_process_id_define(mut self) -> Self {
        self.process_id_define = None;
        self
    }

    /// Path of a response file as it appears on the command line. Relative
    /// to the project root, which is also the compiler's working directory.
    pub fn response_file_token_path(&self, name: &str) -> PathBuf {
        match self.response_dir {
            Some(ref dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Path of a response file on disk.
    pub fn response_file_disk_path(&self, name: &str) -> PathBuf {
        self.project_root.join(self.response_file_token_path(name))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.switchyard/config.toml)
/// 2. Global config (~/.switchyard/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> ConfigFile {
    let mut config = ConfigFile::default();

    if global_path.exists() {
        config.merge(ConfigFile::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(ConfigFile::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (~/.switchyard).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".switchyard"))
}

/// Get the global config path (~/.switchyard/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.switchyard/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".switchyard").join("config.toml")
}
