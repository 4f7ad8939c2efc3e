//! Navigation error types.

use std::path::PathBuf;

use docset_storage::StorageError;

/// Errors from building or loading navigation.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// `navigation.yml` could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path of the navigation file.
        path: PathBuf,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
    /// `navigation.yml` is not valid YAML or has the wrong shape.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// Path of the navigation file.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// A declared `toc` source is not a URI.
    #[error("Invalid TOC source: '{value}' could not be parsed as a URI: {source}")]
    InvalidSource {
        /// Declared value.
        value: String,
        /// URI parse error.
        #[source]
        source: url::ParseError,
    },
    /// A navigation identifier could not be formed.
    #[error("Invalid navigation identifier '{value}': {source}")]
    InvalidIdentifier {
        /// Identifier text.
        value: String,
        /// URI parse error.
        #[source]
        source: url::ParseError,
    },
}
