//! Filesystem probing.
//!
//! The driver only ever asks one question of the filesystem: does this file
//! exist? Keeping that behind [`FileProbe`] lets tests run against an
//! in-memory tree.

use std::io;
use std::path::Path;
use std::sync::Arc;

/// Existence checks used by toolchain selection and argument composition.
///
/// Implementations must never fail: anything that prevents a positive
/// answer (permissions, broken links, I/O errors) is "does not exist".
pub trait FileProbe: Send + Sync {
    /// Whether `path` names an existing regular file.
    fn exists(&self, path: &Path) -> bool;
}

impl<T: FileProbe + ?Sized> FileProbe for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

impl<T: FileProbe + ?Sized> FileProbe for Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

impl<T: FileProbe + ?Sized> FileProbe for Box<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileProbe for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        match std::fs::metadata(path) {
            Ok(meta) => meta.is_file(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::debug!("treating {} as missing: {}", path.display(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_real_fs_exists() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("mcs.rsp");
        fs::write(&file, "-warnaserror").unwrap();

        assert!(RealFileSystem.exists(&file));
        assert!(!RealFileSystem.exists(&tmp.path().join("missing.rsp")));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let tmp = TempDir::new().unwrap();
        assert!(!RealFileSystem.exists(tmp.path()));
    }

    #[test]
    fn test_probe_through_references() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.dll");
        fs::write(&file, "").unwrap();

        let shared: Arc<dyn FileProbe> = Arc::new(RealFileSystem);
        assert!(shared.exists(&file));
        assert!((&RealFileSystem).exists(&file));
    }
}
