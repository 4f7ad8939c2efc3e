//! The [`FileSystem`] trait.

use std::path::Path;

use crate::error::StorageError;

/// Read-only file-system access used during TOC resolution.
///
/// All methods are synchronous and never retried. A missing file is reported
/// to the caller, who decides whether it is a diagnostic or an error.
pub trait FileSystem: Send + Sync {
    /// Read a whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read_to_string(&self, path: &Path) -> Result<String, StorageError>;

    /// Check if a regular file exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;

    /// Check if a directory exists at `path`.
    fn dir_exists(&self, path: &Path) -> bool;

    /// List names of files directly inside `dir` matching a glob `pattern`.
    ///
    /// Only file names are returned (no directory component). The listing is
    /// non-recursive and unsorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the pattern is invalid or the directory
    /// can't be read.
    fn list_files(&self, dir: &Path, pattern: &str) -> Result<Vec<String>, StorageError>;

    /// List files below `dir` (at any depth) whose name matches `pattern`.
    ///
    /// Returned paths are relative to `dir` and use forward slashes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the pattern is invalid or a directory
    /// can't be read.
    fn list_files_recursive(&self, dir: &Path, pattern: &str)
    -> Result<Vec<String>, StorageError>;
}
