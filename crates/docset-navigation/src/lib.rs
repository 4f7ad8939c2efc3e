//! Navigation trees for documentation sets and assembled sites.
//!
//! This crate provides:
//! - [`DocumentationSetNavigation`]: navigation of one resolved documentation set
//! - [`SiteNavigation`]: several documentation sets merged under `navigation.yml`
//! - [`NavigationTree`]: the arena both are stored in, with URL computation
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::Path;
//! use docset_diagnostics::Collector;
//! use docset_navigation::{
//!     DocumentationSetContext, DocumentationSetNavigation, SiteNavigation, SiteNavigationFile,
//!     SiteOptions,
//! };
//! use docset_storage::FsFileSystem;
//! use docset_toc::{DocumentationSetFile, ResolverOptions};
//!
//! let fs = FsFileSystem::new();
//! let collector = Collector::new();
//! let docset = DocumentationSetFile::load_and_resolve(
//!     &collector,
//!     &fs,
//!     Path::new("guide/docset.yml"),
//!     &ResolverOptions::default(),
//! )?;
//! let guide = DocumentationSetNavigation::new(
//!     &docset,
//!     &DocumentationSetContext {
//!         repository: "guide",
//!         source_dir: Path::new("guide"),
//!         configuration_path: "guide/docset.yml",
//!         fs: &fs,
//!         collector: &collector,
//!     },
//! )?;
//!
//! let options = SiteOptions::default();
//! let file = SiteNavigationFile::load(&fs, Path::new("navigation.yml"), &options.narrative_scheme)?;
//! let site = SiteNavigation::new(&file, vec![guide], &options, &collector);
//! for item in site.nav_items() {
//!     println!("{} -> {}", item.title, item.url);
//! }
//! ```

mod docset;
mod error;
mod site;
mod site_file;
mod tree;

pub use docset::{DocumentationSetContext, DocumentationSetNavigation};
pub use error::NavigationError;
pub use site::{SiteNavigation, SiteOptions};
pub use site_file::{NAVIGATION_FILE_NAME, SiteNavigationFile, SiteTocRef};
pub use tree::{NavItem, NavigationTree, Node, NodeId, NodeKind};
