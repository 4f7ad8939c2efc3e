//! Mock file system for testing.
//!
//! Provides [`MockFileSystem`] for unit testing without disk access.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::StorageError;
use crate::file_system::FileSystem;
use crate::paths::{normalize, to_forward_slashes};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory file system for testing.
///
/// Directories are implied by file paths; empty directories can be added with
/// [`with_dir`](Self::with_dir). Paths are normalized lexically, so
/// `/docs/./guides/../index.md` and `/docs/index.md` address the same file.
///
/// # Example
///
/// ```ignore
/// use docset_storage::{FileSystem, MockFileSystem};
///
/// let fs = MockFileSystem::new()
///     .with_file("/docs/docset.yml", "toc:\n  - file: index.md")
///     .with_file("/docs/index.md", "# Home");
///
/// assert!(fs.file_exists(Path::new("/docs/index.md")));
/// ```
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl MockFileSystem {
    /// Create a new empty mock file system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = normalize(path.as_ref());
        self.register_ancestors(&path);
        self.files.insert(path, content.into());
        self
    }

    /// Add an (empty) directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = normalize(path.as_ref());
        self.register_ancestors(&path);
        self.dirs.insert(path);
        self
    }

    fn register_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn compile(pattern: &str) -> Result<Pattern, StorageError> {
        Pattern::new(pattern).map_err(|e| StorageError::invalid_pattern(BACKEND, pattern, e))
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        self.files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| StorageError::not_found(BACKEND, path))
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize(path))
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.dirs.contains(&normalize(path))
    }

    fn list_files(&self, dir: &Path, pattern: &str) -> Result<Vec<String>, StorageError> {
        let pattern = Self::compile(pattern)?;
        let dir = normalize(dir);
        if !self.dirs.contains(&dir) {
            return Err(StorageError::not_found(BACKEND, dir));
        }

        Ok(self
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir.as_path()))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| pattern.matches(n))
            .collect())
    }

    fn list_files_recursive(
        &self,
        dir: &Path,
        pattern: &str,
    ) -> Result<Vec<String>, StorageError> {
        let pattern = Self::compile(pattern)?;
        let dir = normalize(dir);
        if !self.dirs.contains(&dir) {
            return Err(StorageError::not_found(BACKEND, dir));
        }

        Ok(self
            .files
            .keys()
            .filter_map(|p| p.strip_prefix(&dir).ok())
            .filter(|rel| {
                rel.file_name()
                    .is_some_and(|n| pattern.matches(&n.to_string_lossy()))
            })
            .map(to_forward_slashes)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_with_file_implies_directories() {
        let fs = MockFileSystem::new().with_file("/docs/guides/setup.md", "# Setup");

        assert!(fs.dir_exists(Path::new("/docs")));
        assert!(fs.dir_exists(Path::new("/docs/guides")));
        assert!(fs.file_exists(Path::new("/docs/guides/setup.md")));
        assert!(!fs.file_exists(Path::new("/docs/guides")));
    }

    #[test]
    fn test_read_normalizes_path() {
        let fs = MockFileSystem::new().with_file("/docs/index.md", "# Home");

        let content = fs
            .read_to_string(Path::new("/docs/guides/../index.md"))
            .unwrap();

        assert_eq!(content, "# Home");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let fs = MockFileSystem::new();

        let err = fs.read_to_string(Path::new("/docs/toc.yml")).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.backend(), "Mock");
    }

    #[test]
    fn test_list_files_is_not_recursive() {
        let fs = MockFileSystem::new()
            .with_file("/docs/a.md", "")
            .with_file("/docs/toc.yml", "")
            .with_file("/docs/nested/b.md", "");

        let names = fs.list_files(Path::new("/docs"), "*.md").unwrap();

        assert_eq!(names, vec!["a.md".to_owned()]);
    }

    #[test]
    fn test_list_files_empty_dir() {
        let fs = MockFileSystem::new().with_dir("/docs/empty");

        let names = fs.list_files(Path::new("/docs/empty"), "*.md").unwrap();

        assert!(names.is_empty());
    }

    #[test]
    fn test_list_files_recursive() {
        let fs = MockFileSystem::new()
            .with_file("/rules/a.toml", "")
            .with_file("/rules/linux/b.toml", "")
            .with_file("/rules/linux/notes.md", "");

        let paths = fs
            .list_files_recursive(Path::new("/rules"), "*.toml")
            .unwrap();

        assert_eq!(paths, vec!["a.toml".to_owned(), "linux/b.toml".to_owned()]);
    }
}
