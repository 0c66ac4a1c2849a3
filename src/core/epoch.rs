//! Host generation and runtime version axes.

use serde::{Deserialize, Serialize};

/// Which generation of flag-assembly rules the composer follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Epoch {
    /// Older hosts: no language version, no optimization flag, fixed
    /// response-file names.
    Legacy,
    /// Newer hosts: language version, optimization and the response-file
    /// cascade with deprecation warnings.
    #[default]
    Current,
}

impl Epoch {
    /// Get the epoch name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Epoch::Legacy => "legacy",
            Epoch::Current => "current",
        }
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scripting runtime the host targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeVersion {
    /// The older (3.5-equivalent) scripting runtime
    #[serde(alias = "net35")]
    Legacy,
    /// The latest scripting runtime
    #[default]
    Latest,
}

impl RuntimeVersion {
    /// The `-langversion:` value paired with this runtime.
    ///
    /// Only the latest runtime unlocks C# 6; everything else stays on 4.
    pub fn lang_version(&self) -> &'static str {
        match self {
            RuntimeVersion::Latest => "6",
            RuntimeVersion::Legacy => "4",
        }
    }
}
