//! Response-file merging.
//!
//! At most one `@file` token is ever appended. The current epoch prefers the
//! configured response file and otherwise accepts one profile-specific
//! obsolete name, with a deprecation warning. The legacy epoch walks the
//! toolchain's fixed candidate names silently.

use crate::core::unit::ApiProfile;
use crate::util::config::DriverConfig;
use crate::util::diagnostic::Diagnostic;
use crate::util::fs::FileProbe;

use super::quote_path;

/// Obsolete response file honoured for the constrained subset profile.
pub const SUBSET_LEGACY_RESPONSE_FILE: &str = "smcs.rsp";

/// Obsolete response file honoured for the baseline 2.0 profile.
pub const BASELINE_LEGACY_RESPONSE_FILE: &str = "gmcs.rsp";

/// Append `@<path>` if the named response file exists.
fn add_if_present(
    config: &DriverConfig,
    probe: &dyn FileProbe,
    name: &str,
    args: &mut Vec<String>,
) -> bool {
    if !probe.exists(&config.response_file_disk_path(name)) {
        tracing::debug!("no response file {}", name);
        return false;
    }
    let token_path = config.response_file_token_path(name);
    args.push(format!("@{}", quote_path(&token_path)));
    true
}

/// The obsolete response-file name a profile may still use.
pub fn legacy_response_file(profile: ApiProfile) -> Option<&'static str> {
    match profile {
        ApiProfile::Net20Subset => Some(SUBSET_LEGACY_RESPONSE_FILE),
        ApiProfile::Net20 => Some(BASELINE_LEGACY_RESPONSE_FILE),
        ApiProfile::Net46 => None,
    }
}

/// Current-epoch merge: configured name, then the profile's obsolete name.
pub(super) fn merge_current(
    config: &DriverConfig,
    probe: &dyn FileProbe,
    profile: ApiProfile,
    args: &mut Vec<String>,
    warnings: &mut Vec<Diagnostic>,
) {
    if add_if_present(config, probe, &config.response_file, args) {
        return;
    }

    let Some(legacy) = legacy_response_file(profile) else {
        return;
    };

    if add_if_present(config, probe, legacy, args) {
        let diag = Diagnostic::warning(format!(
            "Using obsolete custom response file '{}'. Please use '{}' instead.",
            legacy, config.response_file
        ))
        .with_location(config.response_file_token_path(legacy));
        diag.emit();
        warnings.push(diag);
    }
}

/// Legacy-epoch merge: first existing candidate wins.
pub(super) fn merge_legacy(
    config: &DriverConfig,
    probe: &dyn FileProbe,
    candidates: &[String],
    args: &mut Vec<String>,
) {
    for name in candidates {
        if add_if_present(config, probe, name, args) {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockFileSystem;

    fn run_current(fs: &MockFileSystem, profile: ApiProfile) -> (Vec<String>, Vec<Diagnostic>) {
        let config = DriverConfig::for_project("/project");
        let mut args = Vec::new();
        let mut warnings = Vec::new();
        merge_current(&config, fs, profile, &mut args, &mut warnings);
        (args, warnings)
    }

    #[test]
    fn test_primary_wins_without_warning() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/project/mcs.rsp", "");
        fs.add_file("/project/gmcs.rsp", "");

        let (args, warnings) = run_current(&fs, ApiProfile::Net20);
        assert_eq!(args, vec!["@\"mcs.rsp\"".to_string()]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_subset_profile_uses_smcs_with_warning() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/project/smcs.rsp", "");
        fs.add_file("/project/gmcs.rsp", "");

        let (args, warnings) = run_current(&fs, ApiProfile::Net20Subset);
        assert_eq!(args, vec!["@\"smcs.rsp\"".to_string()]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "Using obsolete custom response file 'smcs.rsp'. Please use 'mcs.rsp' instead."
        );
    }

    #[test]
    fn test_baseline_profile_uses_gmcs_with_warning() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/project/smcs.rsp", "");
        fs.add_file("/project/gmcs.rsp", "");

        let (args, warnings) = run_current(&fs, ApiProfile::Net20);
        assert_eq!(args, vec!["@\"gmcs.rsp\"".to_string()]);
        assert!(warnings[0].message.contains("'gmcs.rsp'"));
    }

    #[test]
    fn test_modern_profile_ignores_legacy_names() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/project/smcs.rsp", "");
        fs.add_file("/project/gmcs.rsp", "");

        let (args, warnings) = run_current(&fs, ApiProfile::Net46);
        assert!(args.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_legacy_candidates_in_order() {
        let config = DriverConfig::for_project("/project").with_response_dir("Assets");
        let mut fs = MockFileSystem::new();
        fs.add_file("/project/Assets/gmcs.rsp", "");

        let candidates = vec!["mcs.rsp".to_string(), "gmcs.rsp".to_string()];
        let mut args = Vec::new();
        merge_legacy(&config, &fs, &candidates, &mut args);
        assert_eq!(args, vec!["@\"Assets/gmcs.rsp\"".to_string()]);

        fs.add_file("/project/Assets/mcs.rsp", "");
        let mut args = Vec::new();
        merge_legacy(&config, &fs, &candidates, &mut args);
        assert_eq!(args, vec!["@\"Assets/mcs.rsp\"".to_string()]);
    }
}
