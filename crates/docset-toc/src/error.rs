//! Errors for root TOC inputs.

use std::path::PathBuf;

use docset_storage::StorageError;

/// Failure to load a root `docset.yml`.
///
/// Problems in nested `toc.yml` files are reported as diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying storage error.
        source: StorageError,
    },
    /// The file is not valid YAML or has an invalid entry.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}
