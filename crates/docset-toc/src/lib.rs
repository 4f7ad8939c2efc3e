//! Table of contents model, YAML decoding and resolution.
//!
//! A documentation set is described by a root `docset.yml` whose `toc:` list
//! may reference folders, files, cross-links, generated rule overviews and
//! nested `toc.yml` files. This crate decodes those documents into
//! [`TocItem`] trees and resolves them into trees with final paths.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use docset_diagnostics::Collector;
//! use docset_storage::FsFileSystem;
//! use docset_toc::{DocumentationSetFile, ResolverOptions};
//!
//! let collector = Collector::new();
//! let docset = DocumentationSetFile::load_and_resolve(
//!     &collector,
//!     &FsFileSystem::new(),
//!     Path::new("docs/docset.yml"),
//!     &ResolverOptions::default(),
//! )?;
//! for page in docset.file_refs() {
//!     println!("{}", page.path_relative_to_docset());
//! }
//! ```

mod decode;
mod error;
mod file;
mod item;
mod resolve;
mod rules;

pub use decode::decode_entry;
pub use error::TocError;
pub use file::{
    DOCSET_FILE_NAME, DocumentationSetFile, Features, ProductLink, TOC_FILE_NAME,
    TableOfContentsFile,
};
pub use item::{
    CrossLinkRef, FileKind, FileRef, FolderRef, INDEX_FILE_NAME, RuleOverviewRef, TocItem, TocRef,
    Walk,
};
pub use resolve::{Resolver, ResolverOptions};
pub use rules::{RuleScanner, TomlRuleScanner};
