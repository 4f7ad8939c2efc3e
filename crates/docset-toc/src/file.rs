//! `docset.yml` and `toc.yml` documents.

use std::collections::BTreeMap;
use std::path::Path;

use docset_diagnostics::{DiagnosticsCollector, Suppressions};
use docset_storage::FileSystem;
use docset_storage::paths::to_forward_slashes;
use serde::Deserialize;

use crate::decode;
use crate::error::TocError;
use crate::item::{TocItem, Walk};
use crate::resolve::{Resolver, ResolverOptions};

/// File name of a documentation set root.
pub const DOCSET_FILE_NAME: &str = "docset.yml";

/// File name of a nested table of contents.
pub const TOC_FILE_NAME: &str = "toc.yml";

/// A nested `toc.yml` document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TableOfContentsFile {
    /// Project name.
    pub project: Option<String>,
    /// Entries in declared order.
    #[serde(deserialize_with = "decode::toc_items")]
    pub toc: Vec<TocItem>,
    /// Hint kinds to suppress for entries declared in this file.
    pub suppress: Suppressions,
}

impl TableOfContentsFile {
    /// Parse a `toc.yml` document. Blank input is an empty file.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML, unknown `suppress` names or
    /// invalid cross-link URIs.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }
}

/// Feature flags of a documentation set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Features {
    /// Render the set with primary navigation.
    pub primary_nav: Option<bool>,
    /// Hide the "edit on GitHub" link.
    pub disable_github_edit_link: Option<bool>,
}

/// Product a documentation set belongs to, as listed under `products:`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProductLink {
    /// Product identifier, e.g. `elasticsearch` or `cloud_hosted`.
    pub id: String,
}

impl ProductLink {
    /// Identifier in the dashed form product catalogs key on.
    pub fn normalized_id(&self) -> String {
        self.id.replace('_', "-")
    }
}

/// A root `docset.yml` document.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocumentationSetFile {
    /// Project name.
    pub project: Option<String>,
    /// Entries in declared order; resolved after [`load_and_resolve`](Self::load_and_resolve).
    #[serde(deserialize_with = "decode::toc_items")]
    pub toc: Vec<TocItem>,
    /// Hint kinds to suppress for entries declared in this file.
    pub suppress: Suppressions,
    /// Maximum navigation depth rendered for this set.
    pub max_toc_depth: u32,
    /// Developer documentation flag.
    pub dev_docs: bool,
    /// Repositories this set links to.
    pub cross_links: Vec<String>,
    /// Glob patterns of files excluded from the build.
    pub exclude: Vec<String>,
    /// Enabled Markdown extensions.
    pub extensions: Vec<String>,
    /// Substitution variables.
    pub subs: BTreeMap<String, String>,
    /// Feature flags.
    pub features: Features,
    /// API specification files keyed by product.
    pub api: BTreeMap<String, String>,
    /// Products this set documents.
    pub products: Vec<ProductLink>,
}

impl Default for DocumentationSetFile {
    fn default() -> Self {
        Self {
            project: None,
            toc: Vec::new(),
            suppress: Suppressions::default(),
            max_toc_depth: 2,
            dev_docs: false,
            cross_links: Vec::new(),
            exclude: Vec::new(),
            extensions: Vec::new(),
            subs: BTreeMap::new(),
            features: Features::default(),
            api: BTreeMap::new(),
            products: Vec::new(),
        }
    }
}

impl DocumentationSetFile {
    /// Parse a `docset.yml` document without resolving it.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML, unknown `suppress` names or
    /// invalid cross-link URIs.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Read `docset_path` and resolve its table of contents.
    ///
    /// Structural problems are reported to `collector`; only an unreadable or
    /// unparseable root file is an error.
    ///
    /// # Errors
    ///
    /// Returns [`TocError`] if the root file can't be read or parsed.
    pub fn load_and_resolve(
        collector: &dyn DiagnosticsCollector,
        fs: &dyn FileSystem,
        docset_path: &Path,
        options: &ResolverOptions,
    ) -> Result<Self, TocError> {
        let yaml = fs.read_to_string(docset_path).map_err(|source| TocError::Read {
            path: docset_path.to_path_buf(),
            source,
        })?;
        let source_dir = docset_path.parent().unwrap_or(Path::new(""));
        let context = to_forward_slashes(docset_path);
        Self::resolve_yaml(collector, fs, &yaml, source_dir, &context, options).map_err(|source| {
            TocError::Parse {
                path: docset_path.to_path_buf(),
                source,
            }
        })
    }

    /// Parse `yaml` as the `docset.yml` of `source_dir` and resolve it.
    ///
    /// # Errors
    ///
    /// Returns [`TocError::Parse`] if the YAML is invalid.
    pub fn load_and_resolve_yaml(
        collector: &dyn DiagnosticsCollector,
        fs: &dyn FileSystem,
        yaml: &str,
        source_dir: &Path,
        options: &ResolverOptions,
    ) -> Result<Self, TocError> {
        let docset_path = source_dir.join(DOCSET_FILE_NAME);
        let context = to_forward_slashes(&docset_path);
        Self::resolve_yaml(collector, fs, yaml, source_dir, &context, options).map_err(|source| {
            TocError::Parse {
                path: docset_path,
                source,
            }
        })
    }

    fn resolve_yaml(
        collector: &dyn DiagnosticsCollector,
        fs: &dyn FileSystem,
        yaml: &str,
        source_dir: &Path,
        context: &str,
        options: &ResolverOptions,
    ) -> Result<Self, serde_yaml::Error> {
        let mut docset = Self::from_yaml(yaml)?;
        tracing::debug!(docset = %context, entries = docset.toc.len(), "Resolving documentation set");

        let resolver = Resolver::new(collector, fs, source_dir, options);
        let suppress = resolver.suppressions_for(context, &docset.suppress);
        docset.toc = resolver.resolve(&docset.toc, context, &suppress);
        Ok(docset)
    }

    /// Page entries (files and rule overviews) in navigation order.
    ///
    /// Pages with children are followed by their children, including the
    /// rule files generated under a rule overview. Cross-links, folders and
    /// nested TOC references contribute only their descendants.
    pub fn file_refs(&self) -> Vec<&TocItem> {
        Walk::over(&self.toc).filter(|item| item.is_page()).collect()
    }
}
