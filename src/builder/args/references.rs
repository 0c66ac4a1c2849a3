//! Implicit framework references.
//!
//! The host lists the framework assemblies a profile needs; only those that
//! actually exist in the profile's reference directory are passed on, so
//! unused libraries never end up in the output.

use std::path::PathBuf;

use crate::builder::toolchain::BaseCompilerBehavior;
use crate::core::unit::ApiProfile;
use crate::util::fs::FileProbe;

use super::quote_path;

/// Reference directory name used for the baseline 2.0 profile.
///
/// The newer compiler builds 2.0 code against the `2.0-api` reference
/// assemblies even though the code runs on 2.0.
pub const BASELINE_REFERENCE_PROFILE: &str = "2.0-api";

/// Directory the implicit references of `profile` are resolved against.
pub fn reference_directory(behavior: &dyn BaseCompilerBehavior, profile: ApiProfile) -> PathBuf {
    if profile.is_baseline() {
        behavior.reference_root().join(BASELINE_REFERENCE_PROFILE)
    } else {
        behavior.profile_directory(profile)
    }
}

/// `-r:` tokens for every implicit reference that exists on disk.
pub fn implicit_reference_args(
    behavior: &dyn BaseCompilerBehavior,
    probe: &dyn FileProbe,
    profile: ApiProfile,
) -> Vec<String> {
    let directory = reference_directory(behavior, profile);

    behavior
        .additional_references(profile)
        .into_iter()
        .filter_map(|name| {
            let path = directory.join(&name);
            if probe.exists(&path) {
                Some(format!("-r:{}", quote_path(&path)))
            } else {
                tracing::debug!("skipping implicit reference {}", path.display());
                None
            }
        })
        .collect()
}
