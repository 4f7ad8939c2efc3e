//! Navigation of a single documentation set.
//!
//! Converts a resolved [`DocumentationSetFile`] into arena nodes. The
//! documentation set itself and every nested TOC become root-capable nodes
//! registered under an identifier (`<repository>://` and
//! `<repository>://<toc path>`) so the site assembler can re-home them.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use docset_diagnostics::DiagnosticsCollector;
use docset_storage::FileSystem;
use docset_storage::paths::file_name;
use docset_toc::{
    CrossLinkRef, DocumentationSetFile, FileRef, FolderRef, RuleOverviewRef, TocItem, TocRef,
};
use regex::Regex;
use url::Url;

use crate::error::NavigationError;
use crate::tree::{NavigationTree, Node, NodeId, NodeKind};

/// First H1 heading of a Markdown document.
static H1_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Where a documentation set comes from and where its problems are reported.
#[derive(Clone, Copy)]
pub struct DocumentationSetContext<'a> {
    /// Repository name, used as the identifier scheme.
    pub repository: &'a str,
    /// Directory holding `docset.yml`.
    pub source_dir: &'a Path,
    /// Path of `docset.yml` for diagnostics.
    pub configuration_path: &'a str,
    /// File system the Markdown files are read from.
    pub fs: &'a dyn FileSystem,
    /// Diagnostics sink.
    pub collector: &'a dyn DiagnosticsCollector,
}

/// Navigation tree of one documentation set.
#[derive(Debug)]
pub struct DocumentationSetNavigation {
    tree: NavigationTree,
    root: NodeId,
    identifier: Url,
    table_of_content_nodes: BTreeMap<Url, NodeId>,
}

impl DocumentationSetNavigation {
    /// Build the navigation of a resolved documentation set.
    ///
    /// Entries that can't be turned into navigation are reported to the
    /// collector and left out.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidIdentifier`] if the repository name
    /// is not a valid URI scheme.
    pub fn new(
        docset: &DocumentationSetFile,
        ctx: &DocumentationSetContext<'_>,
    ) -> Result<Self, NavigationError> {
        let identifier = parse_identifier(&format!("{}://", ctx.repository))?;

        let mut builder = Builder {
            ctx,
            tree: NavigationTree::new(),
            tocs: BTreeMap::new(),
        };
        let title = docset.project.as_deref().unwrap_or(ctx.repository);
        let mut node = Node::new(NodeKind::DocumentationSet, title, "", "");
        node.identifier = Some(identifier.clone());
        let root = builder.tree.push(node);
        builder.tocs.insert(identifier.clone(), root);

        let items = builder.convert_all(&docset.toc);
        if items.is_empty() {
            let name = docset.project.as_deref().unwrap_or("unnamed");
            let message = if docset.toc.is_empty() {
                format!(
                    "Documentation set '{name}' ({}) has no table of contents defined",
                    ctx.configuration_path
                )
            } else {
                format!(
                    "Documentation set '{name}' ({}) table of contents has items defined but none could be created",
                    ctx.configuration_path
                )
            };
            ctx.collector.emit_error(ctx.configuration_path, &message);
        } else {
            builder.tree.set_children(root, items);
            builder.adopt_index_title(root);
        }

        tracing::debug!(
            identifier = %identifier,
            nodes = builder.tree.len(),
            tocs = builder.tocs.len(),
            "Built documentation set navigation"
        );

        Ok(Self {
            tree: builder.tree,
            root,
            identifier,
            table_of_content_nodes: builder.tocs,
        })
    }

    /// Give the documentation set an explicit URL prefix.
    #[must_use]
    pub fn with_path_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        self.tree.set_prefix(self.root, prefix.to_owned());
        self
    }

    /// Identifier of the documentation set, `<repository>://`.
    pub fn identifier(&self) -> &Url {
        &self.identifier
    }

    /// Root node of the documentation set.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The navigation tree.
    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    /// Root-capable nodes by identifier: the set itself and every nested TOC.
    pub fn table_of_content_nodes(&self) -> &BTreeMap<Url, NodeId> {
        &self.table_of_content_nodes
    }

    /// URL of a node.
    pub fn url_of(&self, id: NodeId) -> String {
        self.tree.url(id)
    }

    pub(crate) fn into_parts(self) -> (NavigationTree, BTreeMap<Url, NodeId>) {
        (self.tree, self.table_of_content_nodes)
    }
}

struct Builder<'c, 'a> {
    ctx: &'c DocumentationSetContext<'a>,
    tree: NavigationTree,
    tocs: BTreeMap<Url, NodeId>,
}

impl Builder<'_, '_> {
    fn convert_all(&mut self, items: &[TocItem]) -> Vec<NodeId> {
        items.iter().filter_map(|item| self.convert(item)).collect()
    }

    fn convert(&mut self, item: &TocItem) -> Option<NodeId> {
        match item {
            TocItem::File(file) => self.convert_file(file),
            TocItem::RuleOverview(overview) => self.convert_rule_overview(overview),
            TocItem::Folder(folder) => self.convert_folder(folder),
            TocItem::IsolatedToc(toc) => self.convert_toc(toc),
            TocItem::CrossLink(link) => Some(self.convert_cross_link(link)),
        }
    }

    fn convert_file(&mut self, file: &FileRef) -> Option<NodeId> {
        self.convert_page(
            &file.path,
            &file.path_relative_to_container,
            file.hidden,
            &file.children,
        )
    }

    fn convert_rule_overview(&mut self, overview: &RuleOverviewRef) -> Option<NodeId> {
        self.convert_page(
            &overview.path,
            &overview.path_relative_to_container,
            false,
            &overview.children,
        )
    }

    fn convert_page(
        &mut self,
        path: &str,
        relative: &str,
        hidden: bool,
        children: &[TocItem],
    ) -> Option<NodeId> {
        let title = self.page_title(path);
        let kind = if children.is_empty() {
            NodeKind::File
        } else {
            NodeKind::VirtualFile
        };
        let mut node = Node::new(kind, title, path, relative);
        node.hidden = hidden;
        let id = self.tree.push(node);

        if kind == NodeKind::VirtualFile {
            let items = self.convert_all(children);
            if items.is_empty() {
                self.ctx.collector.emit_error(
                    self.ctx.configuration_path,
                    &format!(
                        "File navigation '{path}' has children defined but none could be created"
                    ),
                );
                return None;
            }
            self.tree.set_children(id, items);
        }
        Some(id)
    }

    fn convert_folder(&mut self, folder: &FolderRef) -> Option<NodeId> {
        let title = titlecase_from_slug(&file_name(&folder.path).to_lowercase());
        let id = self.tree.push(Node::new(
            NodeKind::Folder,
            title,
            &folder.path,
            &folder.path_relative_to_container,
        ));

        let items = self.convert_all(&folder.children);
        if items.is_empty() {
            self.ctx.collector.emit_error(
                &folder.context,
                &format!(
                    "Folder navigation '{}' has children defined but none could be created ({}:)",
                    folder.path, folder.context
                ),
            );
            return None;
        }
        self.tree.set_children(id, items);
        self.adopt_index_title(id);
        Some(id)
    }

    fn convert_toc(&mut self, toc: &TocRef) -> Option<NodeId> {
        let title = titlecase_from_slug(&file_name(&toc.path).to_lowercase());
        let mut node = Node::new(
            NodeKind::TableOfContents,
            title,
            &toc.path,
            &toc.path_relative_to_container,
        );
        match parse_identifier(&format!("{}://{}", self.ctx.repository, toc.path)) {
            Ok(identifier) => node.identifier = Some(identifier),
            Err(e) => self.ctx.collector.emit_error(&toc.context, &e.to_string()),
        }
        let id = self.tree.push(node);

        let items = self.convert_all(&toc.children);
        if items.is_empty() {
            let message = if toc.children.is_empty() {
                format!(
                    "Table of contents navigation '{}' has no children defined ({}:)",
                    toc.path, toc.context
                )
            } else {
                format!(
                    "Table of contents navigation '{}' has children defined but none could be created ({}:)",
                    toc.path, toc.context
                )
            };
            self.ctx.collector.emit_error(&toc.context, &message);
            return None;
        }
        self.tree.set_children(id, items);
        self.adopt_index_title(id);

        if let Some(identifier) = self.tree.node(id).identifier.clone() {
            self.tocs.insert(identifier, id);
        }
        Some(id)
    }

    fn convert_cross_link(&mut self, link: &CrossLinkRef) -> NodeId {
        let uri = link.uri.as_str();
        let title = link.title.as_deref().unwrap_or(uri);
        let mut node = Node::new(NodeKind::CrossLink, title, uri, uri);
        node.hidden = link.hidden;
        self.tree.push(node)
    }

    /// Title of a grouping node is the title of its landing page.
    fn adopt_index_title(&mut self, id: NodeId) {
        if let Some(index) = self.tree.index(id) {
            let title = self.tree.node(index).title.clone();
            self.tree.node_mut(id).title = title;
        }
    }

    /// First H1 of the page, else the title-cased file stem.
    fn page_title(&self, path: &str) -> String {
        let full = self.ctx.source_dir.join(path);
        match self.ctx.fs.read_to_string(&full) {
            Ok(content) => {
                if let Some(caps) = H1_PATTERN.captures(&content) {
                    return caps[1].trim().to_owned();
                }
            }
            Err(e) => {
                tracing::trace!(path = %full.display(), error = %e, "No page to read title from");
            }
        }
        let name = file_name(path);
        let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
        titlecase_from_slug(&stem.to_lowercase())
    }
}

fn parse_identifier(value: &str) -> Result<Url, NavigationError> {
    Url::parse(value).map_err(|source| NavigationError::InvalidIdentifier {
        value: value.to_owned(),
        source,
    })
}

/// Convert a slug like "getting-started" to "Getting Started".
pub(crate) fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use docset_diagnostics::{Collector, Severity};
    use docset_storage::MockFileSystem;
    use docset_toc::ResolverOptions;
    use pretty_assertions::assert_eq;

    use super::*;

    fn build(fs: &MockFileSystem, yaml: &str) -> (DocumentationSetNavigation, Collector) {
        let collector = Collector::new();
        let docset = DocumentationSetFile::load_and_resolve_yaml(
            &collector,
            fs,
            yaml,
            Path::new("/docs"),
            &ResolverOptions::default(),
        )
        .unwrap();
        let ctx = DocumentationSetContext {
            repository: "guide",
            source_dir: Path::new("/docs"),
            configuration_path: "/docs/docset.yml",
            fs,
            collector: &collector,
        };
        let navigation = DocumentationSetNavigation::new(&docset, &ctx).unwrap();
        (navigation, collector)
    }

    fn titles(navigation: &DocumentationSetNavigation, items: &[NodeId]) -> Vec<String> {
        items
            .iter()
            .map(|&id| navigation.tree().node(id).title.clone())
            .collect()
    }

    #[test]
    fn test_titlecase_from_slug() {
        assert_eq!(titlecase_from_slug("getting-started"), "Getting Started");
        assert_eq!(titlecase_from_slug("api_reference"), "Api Reference");
        assert_eq!(titlecase_from_slug("--"), "");
    }

    #[test]
    fn test_titles_from_heading_or_file_name() {
        let fs = MockFileSystem::new()
            .with_file("/docs/index.md", "# Welcome\n\nText")
            .with_file("/docs/getting-started.md", "No heading here");
        let yaml = "\
toc:
  - file: index.md
  - file: getting-started.md
  - file: missing-page.md
";

        let (navigation, _) = build(&fs, yaml);

        let tree = navigation.tree();
        let root = navigation.root();
        let index = tree.index(root).unwrap();
        assert_eq!(tree.node(index).title, "Welcome");
        assert_eq!(tree.node(root).title, "Welcome");
        assert_eq!(
            titles(&navigation, tree.navigation_items(root)),
            vec!["Getting Started", "Missing Page"]
        );
    }

    #[test]
    fn test_identifiers_for_set_and_nested_tocs() {
        let fs = MockFileSystem::new()
            .with_file("/docs/index.md", "# Home")
            .with_file("/docs/reference/toc.yml", "toc:\n  - file: index.md\n")
            .with_file("/docs/reference/index.md", "# Reference");
        let yaml = "toc:\n  - file: index.md\n  - toc: reference\n";

        let (navigation, collector) = build(&fs, yaml);

        assert!(collector.diagnostics().is_empty());
        assert_eq!(navigation.identifier().as_str(), "guide://");
        let keys: Vec<_> = navigation
            .table_of_content_nodes()
            .keys()
            .map(Url::as_str)
            .collect();
        assert_eq!(keys, vec!["guide://", "guide://reference"]);

        let toc = navigation.table_of_content_nodes()[&Url::parse("guide://reference").unwrap()];
        assert_eq!(navigation.tree().node(toc).kind, NodeKind::TableOfContents);
        assert_eq!(navigation.tree().node(toc).title, "Reference");
        assert_eq!(navigation.url_of(toc), "/reference");
    }

    #[test]
    fn test_urls_with_prefix() {
        let fs = MockFileSystem::new();
        let yaml = "\
toc:
  - file: index.md
  - folder: guides
    children:
      - file: index.md
      - file: setup.md
";

        let (navigation, _) = build(&fs, yaml);
        let navigation = navigation.with_path_prefix("/docs/");

        let tree = navigation.tree();
        let root = navigation.root();
        let folder = tree.navigation_items(root)[0];
        let setup = tree.navigation_items(folder)[0];
        assert_eq!(navigation.url_of(root), "/docs");
        assert_eq!(navigation.url_of(folder), "/docs/guides");
        assert_eq!(navigation.url_of(setup), "/docs/guides/setup");
        assert_eq!(tree.depth(setup), 2);
    }

    #[test]
    fn test_virtual_file_and_cross_link() {
        let fs = MockFileSystem::new();
        let yaml = "\
toc:
  - file: index.md
  - file: intro.md
    children:
      - file: details.md
  - crosslink: kibana://reference/index.md
    title: Kibana
  - crosslink: beats://index.md
";

        let (navigation, _) = build(&fs, yaml);

        let tree = navigation.tree();
        let items = tree.navigation_items(navigation.root());
        assert_eq!(tree.node(items[0]).kind, NodeKind::VirtualFile);
        assert_eq!(tree.navigation_items(items[0]).len(), 1);
        assert_eq!(tree.node(items[1]).kind, NodeKind::CrossLink);
        assert_eq!(tree.node(items[1]).title, "Kibana");
        assert_eq!(navigation.url_of(items[1]), "kibana://reference/index.md");
        assert_eq!(tree.node(items[2]).title, "beats://index.md");
    }

    #[test]
    fn test_hidden_file_is_kept_but_not_rendered() {
        let fs = MockFileSystem::new();
        let yaml = "toc:\n  - file: index.md\n  - file: a.md\n  - hidden: secret.md\n";

        let (navigation, _) = build(&fs, yaml);

        let tree = navigation.tree();
        assert_eq!(tree.navigation_items(navigation.root()).len(), 2);
        let rendered = tree.nav_items(navigation.root());
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].url, "/a");
    }

    #[test]
    fn test_empty_set_is_error() {
        let fs = MockFileSystem::new();

        let (navigation, collector) = build(&fs, "toc: []\n");

        let errors = collector.of_severity(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Documentation set 'unnamed' (/docs/docset.yml) has no table of contents defined"
        );
        assert!(navigation.tree().navigation_items(navigation.root()).is_empty());
        assert_eq!(navigation.url_of(navigation.root()), "/");
    }

    #[test]
    fn test_invalid_repository_is_error() {
        let fs = MockFileSystem::new();
        let collector = Collector::new();
        let ctx = DocumentationSetContext {
            repository: "not a scheme",
            source_dir: Path::new("/docs"),
            configuration_path: "/docs/docset.yml",
            fs: &fs,
            collector: &collector,
        };

        let result = DocumentationSetNavigation::new(&DocumentationSetFile::default(), &ctx);

        assert!(matches!(result, Err(NavigationError::InvalidIdentifier { .. })));
    }
}
