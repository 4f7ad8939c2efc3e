//! File-system abstraction for documentation set resolution.
//!
//! TOC resolution only ever touches the file system through the [`FileSystem`]
//! trait. This keeps the resolver a pure function of YAML text plus
//! file-system state and lets tests run against an in-memory tree.
//!
//! The crate provides:
//! - [`FileSystem`] trait with read, existence and directory listing methods
//! - [`FsFileSystem`] backed by the local disk
//! - [`MockFileSystem`] for testing (behind `mock` feature flag)
//! - Forward-slash path helpers used for documentation-relative paths
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use docset_storage::{FileSystem, FsFileSystem};
//!
//! let fs = FsFileSystem::new();
//! let names = fs.list_files(Path::new("docs/guides"), "*.md")?;
//! ```

mod error;
mod file_system;
mod fs;
#[cfg(feature = "mock")]
mod mock;
pub mod paths;

pub use error::{StorageError, StorageErrorKind};
pub use file_system::FileSystem;
pub use fs::FsFileSystem;
#[cfg(feature = "mock")]
pub use mock::MockFileSystem;
