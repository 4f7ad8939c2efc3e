//! Storage error types.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use glob::PatternError;

/// What went wrong while touching the documentation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// File or directory is missing.
    NotFound,
    /// Access was refused.
    PermissionDenied,
    /// A listing pattern is not a valid glob.
    InvalidPattern,
    /// File content is not UTF-8.
    InvalidData,
    /// Any other backend failure.
    Other,
}

impl StorageErrorKind {
    fn from_io(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::InvalidData => Self::InvalidData,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::InvalidPattern => "invalid glob pattern",
            Self::InvalidData => "invalid UTF-8",
            Self::Other => "I/O error",
        })
    }
}

#[derive(Debug)]
enum Subject {
    Path(PathBuf),
    Pattern(String),
}

/// Failure reading or listing documentation files.
///
/// Displays as `<backend>: <kind>: <path or pattern>[: <cause>]`.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    backend: &'static str,
    subject: Subject,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// `path` does not exist in `backend`.
    #[must_use]
    pub fn not_found(backend: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: StorageErrorKind::NotFound,
            backend,
            subject: Subject::Path(path.into()),
            source: None,
        }
    }

    /// An I/O failure on `path`, categorized by its [`io::ErrorKind`].
    #[must_use]
    pub fn io(backend: &'static str, path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self {
            kind: StorageErrorKind::from_io(err.kind()),
            backend,
            subject: Subject::Path(path.into()),
            source: Some(Box::new(err)),
        }
    }

    /// `pattern` could not be compiled as a glob.
    #[must_use]
    pub fn invalid_pattern(backend: &'static str, pattern: &str, err: PatternError) -> Self {
        Self {
            kind: StorageErrorKind::InvalidPattern,
            backend,
            subject: Subject::Pattern(pattern.to_owned()),
            source: Some(Box::new(err)),
        }
    }

    /// Error category.
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Backend that produced the error (`"Fs"`, `"Mock"`).
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Path the failed operation was about, if it was about a path.
    pub fn path(&self) -> Option<&Path> {
        match &self.subject {
            Subject::Path(path) => Some(path),
            Subject::Pattern(_) => None,
        }
    }

    /// Whether the file or directory is missing.
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: ", self.backend, self.kind)?;
        match &self.subject {
            Subject::Path(path) => write!(f, "{}", path.display())?,
            Subject::Pattern(pattern) => write!(f, "'{pattern}'")?,
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}
