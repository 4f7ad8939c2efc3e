//! Site navigation assembly.
//!
//! Merges the navigation of several documentation sets into one tree driven
//! by `navigation.yml`. Every declared reference names a root-capable node
//! (a documentation set or nested TOC) by identifier and gives it a URL
//! prefix. Undeclared roots below a declared one are re-homed under its
//! prefix; those still listed by a folder keep their place, and every other
//! root nobody declared ends up directly under the site root so every node
//! stays reachable.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use docset_config::{Config, DEFAULT_NARRATIVE_SCHEME};
use docset_diagnostics::DiagnosticsCollector;
use url::Url;

use crate::docset::DocumentationSetNavigation;
use crate::site_file::{NAVIGATION_FILE_NAME, SiteNavigationFile, SiteTocRef};
use crate::tree::{NavItem, NavigationTree, Node, NodeId, NodeKind, join_url};

/// Site-wide assembly settings.
#[derive(Clone, Debug)]
pub struct SiteOptions {
    /// URL prefix for every page of the site.
    pub prefix: Option<String>,
    /// Scheme whose references don't need an explicit `path_prefix`.
    pub narrative_scheme: String,
    /// Path of `navigation.yml` for diagnostics.
    pub configuration_path: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            narrative_scheme: DEFAULT_NARRATIVE_SCHEME.to_owned(),
            configuration_path: NAVIGATION_FILE_NAME.to_owned(),
        }
    }
}

impl From<&Config> for SiteOptions {
    fn from(config: &Config) -> Self {
        Self {
            prefix: config.site.prefix.clone(),
            narrative_scheme: config.site.narrative_scheme.clone(),
            ..Self::default()
        }
    }
}

/// Assembled navigation of a whole site.
#[derive(Debug)]
pub struct SiteNavigation {
    tree: NavigationTree,
    root: NodeId,
    index: Option<NodeId>,
    site_prefix: Option<String>,
    nodes: BTreeMap<Url, NodeId>,
    declared_phantoms: BTreeSet<Url>,
    declared_sources: BTreeSet<Url>,
    unseen_nodes: BTreeSet<Url>,
}

impl SiteNavigation {
    /// Assemble `sets` as declared by `file`.
    ///
    /// Problems are reported to `collector` against
    /// [`SiteOptions::configuration_path`]; assembly always completes.
    pub fn new(
        file: &SiteNavigationFile,
        sets: Vec<DocumentationSetNavigation>,
        options: &SiteOptions,
        collector: &dyn DiagnosticsCollector,
    ) -> Self {
        let site_prefix = normalize_site_prefix(options.prefix.as_deref());

        let mut tree = NavigationTree::new();
        let mut site = Node::new(NodeKind::Site, "", "", "");
        site.identifier = Url::parse("site://").ok();
        let root = tree.push(site);
        if let Some(prefix) = &site_prefix {
            tree.set_prefix(root, prefix.clone());
        }

        let mut nodes = BTreeMap::new();
        for set in sets {
            let (set_tree, tocs) = set.into_parts();
            let offset = tree.absorb(set_tree);
            for (identifier, id) in tocs {
                match nodes.entry(identifier) {
                    Entry::Vacant(entry) => {
                        entry.insert(id.shifted(offset));
                    }
                    Entry::Occupied(entry) => collector.emit_error(
                        &options.configuration_path,
                        &format!(
                            "Duplicate navigation identifier: {} in navigation.yml",
                            entry.key()
                        ),
                    ),
                }
            }
        }

        let mut assembler = Assembler {
            collector,
            options,
            site_prefix: site_prefix.as_deref(),
            tree,
            unseen: nodes.keys().cloned().collect(),
            nodes: &nodes,
            declared_sources: file.declared_sources(),
            declared_phantoms: file.phantoms.iter().cloned().collect(),
        };

        let items: Vec<NodeId> = file
            .toc
            .iter()
            .enumerate()
            .filter_map(|(index, r)| assembler.create(r, index, root, None))
            .collect();
        assembler.tree.set_children(root, items);
        let index = landing_page(&assembler.tree, root);

        for identifier in &assembler.unseen {
            let Some(&id) = nodes.get(identifier) else {
                continue;
            };
            if !assembler.declared_phantoms.contains(identifier) {
                collector.emit_hint(
                    &options.configuration_path,
                    &format!("Navigation does not explicitly declare: {identifier} as a phantom"),
                );
            }
            if !assembler.tree.is_attached(id) {
                assembler.tree.set_parent(id, Some(root));
            }
        }

        tracing::debug!(
            registered = nodes.len(),
            unseen = assembler.unseen.len(),
            phantoms = assembler.declared_phantoms.len(),
            "Assembled site navigation"
        );

        let Assembler {
            tree,
            unseen,
            declared_sources,
            declared_phantoms,
            ..
        } = assembler;
        Self {
            tree,
            root,
            index,
            site_prefix,
            nodes,
            declared_phantoms,
            declared_sources,
            unseen_nodes: unseen,
        }
    }

    /// URL of the site root: the site prefix, or `/`.
    pub fn url(&self) -> &str {
        self.site_prefix.as_deref().unwrap_or("/")
    }

    /// The site root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Landing page of the site: the top-level index page served at
    /// [`url`](Self::url).
    pub fn index(&self) -> Option<NodeId> {
        self.index
    }

    /// Title of the landing page, empty without one.
    pub fn title(&self) -> &str {
        self.index.map_or("", |index| self.tree.node(index).title.as_str())
    }

    /// The merged navigation tree.
    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    /// Top-level items in declared order.
    pub fn navigation_items(&self) -> &[NodeId] {
        self.tree.navigation_items(self.root)
    }

    /// Root-capable nodes of every documentation set by identifier.
    pub fn nodes(&self) -> &BTreeMap<Url, NodeId> {
        &self.nodes
    }

    /// Identifiers listed under `phantoms:`.
    pub fn declared_phantoms(&self) -> &BTreeSet<Url> {
        &self.declared_phantoms
    }

    /// Identifiers declared anywhere in the `toc:` tree.
    pub fn declared_sources(&self) -> &BTreeSet<Url> {
        &self.declared_sources
    }

    /// Identifiers that no declared reference matched.
    pub fn unseen_nodes(&self) -> &BTreeSet<Url> {
        &self.unseen_nodes
    }

    /// Node data.
    pub fn node(&self, id: NodeId) -> &Node {
        self.tree.node(id)
    }

    /// Node registered under `identifier`.
    pub fn lookup(&self, identifier: &Url) -> Option<NodeId> {
        self.nodes.get(identifier).copied()
    }

    /// URL of a node.
    pub fn url_of(&self, id: NodeId) -> String {
        self.tree.url(id)
    }

    /// Number of ancestors of a node.
    pub fn depth_of(&self, id: NodeId) -> usize {
        self.tree.depth(id)
    }

    /// Parent of a node.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    /// Visible top-level navigation for rendering.
    pub fn nav_items(&self) -> Vec<NavItem> {
        self.tree.nav_items(self.root)
    }
}

struct Assembler<'a> {
    collector: &'a dyn DiagnosticsCollector,
    options: &'a SiteOptions,
    site_prefix: Option<&'a str>,
    tree: NavigationTree,
    nodes: &'a BTreeMap<Url, NodeId>,
    unseen: BTreeSet<Url>,
    declared_sources: BTreeSet<Url>,
    declared_phantoms: BTreeSet<Url>,
}

impl Assembler<'_> {
    fn error(&self, message: &str) {
        self.collector
            .emit_error(&self.options.configuration_path, message);
    }

    /// Place the node declared by `r` under `parent`.
    fn create(
        &mut self,
        r: &SiteTocRef,
        index: usize,
        parent: NodeId,
        root: Option<NodeId>,
    ) -> Option<NodeId> {
        let prefix = self.path_prefix_for(r);
        let source = &r.source;

        let Some(&node) = self.nodes.get(source) else {
            self.error(&format!(
                "Could not find navigation node for identifier: {source}"
            ));
            return None;
        };
        if !self.tree.node(node).kind.accepts_home() {
            self.error(&format!(
                "Navigation node {source} can not be assigned a path prefix"
            ));
            return None;
        }
        if !self.unseen.remove(source) {
            self.error(&format!(
                "Navigation identifier declared more than once: {source}"
            ));
            return None;
        }

        let root = root.unwrap_or(node);
        self.tree.detach(node);
        self.tree.set_parent(node, Some(parent));
        self.tree.node_mut(node).navigation_index = index;
        self.tree.set_home(node, prefix.clone(), root);

        // Nested roots only join the navigation items through their own
        // declaration.
        let mut children: Vec<NodeId> = self
            .tree
            .all_children(node)
            .into_iter()
            .filter(|&child| !self.tree.node(child).kind.is_root())
            .collect();
        for &child in &children {
            self.tree.set_parent(child, Some(node));
        }
        self.carry_nested_roots(node, &prefix, root);

        for (child_index, child) in r.children.iter().enumerate() {
            if let Some(id) = self.create(child, child_index, node, Some(root)) {
                children.push(id);
            }
        }

        self.tree.set_children(node, children);
        Some(node)
    }

    /// Re-home the undeclared roots below `id`, at any folder depth, under
    /// `prefix` and warn about each one that is not a phantom.
    fn carry_nested_roots(&mut self, id: NodeId, prefix: &str, root: NodeId) {
        for child in self.tree.all_children(id) {
            let node = self.tree.node(child);
            if !node.kind.is_root() {
                self.carry_nested_roots(child, prefix, root);
                continue;
            }
            let Some(identifier) = node.identifier.clone() else {
                continue;
            };
            if self.declared_sources.contains(&identifier) {
                continue;
            }
            if !self.declared_phantoms.contains(&identifier) {
                self.collector.emit_warning(
                    &self.options.configuration_path,
                    &format!("Navigation does not explicitly declare: {identifier}"),
                );
            }
            if self.unseen.contains(&identifier) {
                let child_prefix = join_url(prefix, &node.path_relative_to_container);
                self.tree.set_parent(child, Some(id));
                self.tree.set_home(child, child_prefix.clone(), root);
                self.carry_nested_roots(child, &child_prefix, root);
            }
        }
    }

    /// URL prefix for a declared reference, combined with the site prefix.
    ///
    /// References into the narrative repository may omit `path_prefix`; any
    /// other missing prefix is an error with a recognizable fallback.
    fn path_prefix_for(&self, r: &SiteTocRef) -> String {
        let source = &r.source;
        let mut prefix = r.path_prefix.trim().to_owned();
        if prefix.is_empty() {
            let host = source.host_str().unwrap_or_default();
            let path = source.path().trim_start_matches('/');
            if source.scheme() == self.options.narrative_scheme {
                prefix = format!("{host}/{path}");
            } else {
                self.error(&format!(
                    "path_prefix is required for TOC reference: {source}"
                ));
                prefix = format!("bad-mapping-{}-{host}-{path}", source.scheme())
                    .trim_end_matches('/')
                    .trim_end_matches('-')
                    .to_owned();
            }
        }

        let prefix = prefix.trim_matches('/');
        let combined = match self.site_prefix {
            Some(site) => format!("{site}/{prefix}"),
            None => format!("/{prefix}"),
        };
        combined.trim_end_matches('/').to_owned()
    }
}

/// Index page of the first top-level item that lives at the site URL.
fn landing_page(tree: &NavigationTree, root: NodeId) -> Option<NodeId> {
    let site_url = tree.url(root);
    tree.navigation_items(root)
        .iter()
        .filter_map(|&item| tree.index(item))
        .find(|&page| tree.url(page) == site_url)
}

/// Leading `/`, no trailing `/`; blank means no prefix.
fn normalize_site_prefix(prefix: Option<&str>) -> Option<String> {
    let prefix = prefix?.trim();
    if prefix.is_empty() {
        return None;
    }
    let prefix = prefix.trim_end_matches('/');
    if prefix.starts_with('/') {
        Some(prefix.to_owned())
    } else {
        Some(format!("/{prefix}"))
    }
}
