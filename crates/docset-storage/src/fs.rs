//! Local disk implementation of [`FileSystem`].

use std::fs;
use std::path::Path;

use glob::Pattern;

use crate::error::StorageError;
use crate::file_system::FileSystem;
use crate::paths::to_forward_slashes;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

fn compile_pattern(pattern: &str) -> Result<Pattern, StorageError> {
    Pattern::new(pattern).map_err(|e| StorageError::invalid_pattern(BACKEND, pattern, e))
}

/// Filesystem implementation reading directly from disk.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use docset_storage::{FileSystem, FsFileSystem};
///
/// let fs = FsFileSystem::new();
/// let yaml = fs.read_to_string(Path::new("docs/docset.yml"))?;
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FsFileSystem;

impl FsFileSystem {
    /// Create a new disk-backed file system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Recursively collect matching files below `dir` into `out`.
    fn collect_recursive(
        dir: &Path,
        prefix: &str,
        pattern: &Pattern,
        out: &mut Vec<String>,
    ) -> Result<(), StorageError> {
        let entries = fs::read_dir(dir).map_err(|e| StorageError::io(BACKEND, dir, e))?;

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                Self::collect_recursive(&entry.path(), &rel, pattern, out)?;
            } else if pattern.matches(&name) {
                out.push(rel);
            }
        }
        Ok(())
    }
}

impl FileSystem for FsFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).map_err(|e| StorageError::io(BACKEND, path, e))
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path, pattern: &str) -> Result<Vec<String>, StorageError> {
        let pattern = compile_pattern(pattern)?;
        let entries = fs::read_dir(dir).map_err(|e| StorageError::io(BACKEND, dir, e))?;

        Ok(entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| pattern.matches(name))
            .collect())
    }

    fn list_files_recursive(
        &self,
        dir: &Path,
        pattern: &str,
    ) -> Result<Vec<String>, StorageError> {
        let pattern = compile_pattern(pattern)?;
        let mut out = Vec::new();
        Self::collect_recursive(dir, "", &pattern, &mut out)?;
        tracing::trace!(dir = %to_forward_slashes(dir), count = out.len(), "Listed files recursively");
        Ok(out)
    }
}
