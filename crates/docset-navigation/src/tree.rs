//! Arena-backed navigation tree.
//!
//! Nodes are stored in a flat `Vec<Node>` with parent, children and index
//! relationships tracked by [`NodeId`]. Building a level is a two-step fix-up:
//! the children are created first, then [`NavigationTree::set_children`]
//! records the list and points every child back at its parent.
//!
//! URLs are computed on demand from the nearest root-capable ancestor's path
//! prefix, so re-homing a documentation set or nested TOC only means setting
//! one prefix.

use serde::Serialize;
use url::Url;

use docset_storage::paths::file_name;

/// Conventional landing page name.
const INDEX_FILE_NAME: &str = "index.md";

/// Stable handle of a node inside a [`NavigationTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn shifted(self, offset: usize) -> Self {
        Self(self.0 + offset)
    }
}

/// What a navigation node represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top of an assembled site.
    Site,
    /// Top of one documentation set.
    DocumentationSet,
    /// A nested `toc.yml`.
    TableOfContents,
    /// A directory grouping.
    Folder,
    /// A page that groups child entries.
    VirtualFile,
    /// A page.
    File,
    /// A link to another documentation set.
    CrossLink,
}

impl NodeKind {
    /// Whether the node tops a subtree and owns a path prefix.
    pub fn is_root(self) -> bool {
        matches!(self, Self::Site | Self::DocumentationSet | Self::TableOfContents)
    }

    /// Whether the node is terminal content.
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::File | Self::CrossLink)
    }

    /// Whether the site assembler may assign this node a path prefix.
    pub fn accepts_home(self) -> bool {
        matches!(self, Self::DocumentationSet | Self::TableOfContents)
    }

    fn is_page(self) -> bool {
        matches!(self, Self::File | Self::VirtualFile)
    }
}

/// Data of a navigation node. Relationships live in the [`NavigationTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Node kind.
    pub kind: NodeKind,
    /// Navigation title.
    pub title: String,
    /// Path relative to the documentation set root; the URI for cross-links.
    pub path: String,
    /// Path relative to the declaring `docset.yml` / `toc.yml`.
    pub path_relative_to_container: String,
    /// Identifier of root-capable nodes, e.g. `elasticsearch://reference`.
    pub identifier: Option<Url>,
    /// Excluded from rendered navigation.
    pub hidden: bool,
    /// Position among siblings.
    pub navigation_index: usize,
}

impl Node {
    /// Node with no identifier that is visible and first among its siblings.
    pub fn new(
        kind: NodeKind,
        title: impl Into<String>,
        path: impl Into<String>,
        path_relative_to_container: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            path: path.into(),
            path_relative_to_container: path_relative_to_container.into(),
            identifier: None,
            hidden: false,
            navigation_index: 0,
        }
    }
}

/// Navigation item with children for UI trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Navigation nodes with parent/children relationships tracked by index.
#[derive(Clone, Debug, Default)]
pub struct NavigationTree {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
    indexes: Vec<Option<NodeId>>,
    prefixes: Vec<Option<String>>,
    homes: Vec<Option<NodeId>>,
}

impl NavigationTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node data. Panics if `id` belongs to another tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Node data, or `None` if `id` is out of range.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    /// Landing entry of a node, removed from its navigation items.
    pub fn index(&self, id: NodeId) -> Option<NodeId> {
        self.indexes[id.0]
    }

    /// Children of a node in navigation order, excluding its index.
    pub fn navigation_items(&self, id: NodeId) -> &[NodeId] {
        &self.children[id.0]
    }

    /// The index followed by the navigation items.
    pub fn all_children(&self, id: NodeId) -> Vec<NodeId> {
        self.indexes[id.0]
            .into_iter()
            .chain(self.children[id.0].iter().copied())
            .collect()
    }

    /// Number of ancestors of a node.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parents[id.0];
        while let Some(parent) = current {
            depth += 1;
            current = self.parents[parent.0];
        }
        depth
    }

    /// Nearest strict ancestor that owns a path prefix.
    pub fn owning_root(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.parents[id.0];
        while let Some(ancestor) = current {
            if self.nodes[ancestor.0].kind.is_root() {
                return Some(ancestor);
            }
            current = self.parents[ancestor.0];
        }
        None
    }

    /// Root the node was homed under by the site assembler, if any.
    pub fn navigation_root(&self, id: NodeId) -> Option<NodeId> {
        self.homes[id.0]
    }

    /// Explicitly assigned path prefix.
    pub fn explicit_prefix(&self, id: NodeId) -> Option<&str> {
        self.prefixes[id.0].as_deref()
    }

    /// Effective URL prefix of a node.
    ///
    /// Root-capable nodes without an explicit prefix derive theirs from the
    /// owning root; other nodes use their owning root's prefix.
    pub fn path_prefix(&self, id: NodeId) -> String {
        if let Some(prefix) = &self.prefixes[id.0] {
            return prefix.clone();
        }
        let Some(root) = self.owning_root(id) else {
            return String::new();
        };
        let prefix = self.path_prefix(root);
        let node = &self.nodes[id.0];
        if node.kind.is_root() {
            join_url(&prefix, &node.path_relative_to_container)
        } else {
            prefix
        }
    }

    /// URL of a node.
    ///
    /// Pages drop `.md` and a trailing `index` segment; grouping nodes use
    /// their index's URL; cross-links use their URI.
    pub fn url(&self, id: NodeId) -> String {
        let node = &self.nodes[id.0];
        match node.kind {
            NodeKind::CrossLink => node.path.clone(),
            NodeKind::File | NodeKind::VirtualFile => {
                let prefix = self
                    .owning_root(id)
                    .map(|root| self.path_prefix(root))
                    .unwrap_or_default();
                page_url(&prefix, &node.path_relative_to_container)
            }
            NodeKind::Site => non_empty_url(self.path_prefix(id)),
            NodeKind::Folder => match self.indexes[id.0] {
                Some(index) => self.url(index),
                None => non_empty_url(join_url(
                    &self.path_prefix(id),
                    &node.path_relative_to_container,
                )),
            },
            NodeKind::DocumentationSet | NodeKind::TableOfContents => match self.indexes[id.0] {
                Some(index) => self.url(index),
                None => non_empty_url(self.path_prefix(id)),
            },
        }
    }

    /// Visible navigation items below `id` for rendering.
    pub fn nav_items(&self, id: NodeId) -> Vec<NavItem> {
        self.children[id.0]
            .iter()
            .filter(|&&child| !self.nodes[child.0].hidden)
            .map(|&child| NavItem {
                title: self.nodes[child.0].title.clone(),
                url: self.url(child),
                children: self.nav_items(child),
            })
            .collect()
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.parents.push(None);
        self.children.push(Vec::new());
        self.indexes.push(None);
        self.prefixes.push(None);
        self.homes.push(None);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.parents[id.0] = parent;
    }

    /// Whether the node is listed by its parent, as index or navigation item.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.parents[id.0].is_some_and(|parent| {
            self.indexes[parent.0] == Some(id) || self.children[parent.0].contains(&id)
        })
    }

    /// Unlink a node from its parent's index or navigation items.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parents[id.0].take() else {
            return;
        };
        if self.indexes[parent.0] == Some(id) {
            self.indexes[parent.0] = None;
        }
        let siblings = &mut self.children[parent.0];
        let Some(position) = siblings.iter().position(|&child| child == id) else {
            return;
        };
        siblings.remove(position);
        for (index, &sibling) in siblings.iter().enumerate().skip(position) {
            self.nodes[sibling.0].navigation_index = index;
        }
    }

    pub(crate) fn set_home(&mut self, id: NodeId, prefix: String, root: NodeId) {
        self.prefixes[id.0] = Some(prefix);
        self.homes[id.0] = Some(root);
    }

    pub(crate) fn set_prefix(&mut self, id: NodeId, prefix: String) {
        self.prefixes[id.0] = Some(prefix);
    }

    /// Attach `items` under `id` and re-parent them.
    ///
    /// Virtual files are their own landing page: their children only get
    /// `index.md` moved to the front. Other nodes take the child named
    /// `index.md` (else the first page leaf) as their index and drop it from
    /// the navigation items.
    pub(crate) fn set_children(&mut self, id: NodeId, mut items: Vec<NodeId>) {
        let index_position = items.iter().position(|&child| self.is_index_file(child));

        let index = if self.nodes[id.0].kind == NodeKind::VirtualFile {
            if let Some(position) = index_position {
                let index = items.remove(position);
                items.insert(0, index);
            }
            None
        } else {
            index_position
                .or_else(|| {
                    items
                        .iter()
                        .position(|&child| self.nodes[child.0].kind == NodeKind::File)
                })
                .map(|position| items.remove(position))
        };

        if let Some(index) = index {
            self.parents[index.0] = Some(id);
        }
        for (position, &child) in items.iter().enumerate() {
            self.parents[child.0] = Some(id);
            self.nodes[child.0].navigation_index = position;
        }
        self.indexes[id.0] = index;
        self.children[id.0] = items;
    }

    /// Move every node of `other` into this tree. Returns the offset added to
    /// `other`'s node ids.
    pub(crate) fn absorb(&mut self, other: Self) -> usize {
        let offset = self.nodes.len();
        let shift = |id: NodeId| id.shifted(offset);

        self.nodes.extend(other.nodes);
        self.parents.extend(other.parents.into_iter().map(|p| p.map(shift)));
        self.children.extend(
            other
                .children
                .into_iter()
                .map(|c| c.into_iter().map(shift).collect::<Vec<_>>()),
        );
        self.indexes.extend(other.indexes.into_iter().map(|i| i.map(shift)));
        self.prefixes.extend(other.prefixes);
        self.homes.extend(other.homes.into_iter().map(|h| h.map(shift)));
        offset
    }

    fn is_index_file(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        node.kind.is_page() && file_name(&node.path).eq_ignore_ascii_case(INDEX_FILE_NAME)
    }
}

/// Join a URL prefix and a relative path, always yielding a leading `/` when
/// the result is non-empty.
pub(crate) fn join_url(prefix: &str, rel: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let rel = rel.trim_matches('/');
    if rel.is_empty() {
        prefix.to_owned()
    } else {
        format!("{prefix}/{rel}")
    }
}

fn non_empty_url(url: String) -> String {
    if url.is_empty() { "/".to_owned() } else { url }
}

/// URL of a page: `.md` and a trailing `index` segment dropped.
fn page_url(prefix: &str, rel: &str) -> String {
    let rel = rel.strip_suffix(".md").unwrap_or(rel);
    let rel = if rel == "index" {
        ""
    } else {
        rel.strip_suffix("/index").unwrap_or(rel)
    };
    non_empty_url(join_url(prefix, rel))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(tree: &mut NavigationTree, path: &str) -> NodeId {
        tree.push(Node::new(NodeKind::File, path, path, path))
    }

    #[test]
    fn test_page_url() {
        assert_eq!(page_url("", "index.md"), "/");
        assert_eq!(page_url("", "guide.md"), "/guide");
        assert_eq!(page_url("/docs", "guides/index.md"), "/docs/guides");
        assert_eq!(page_url("/docs/", "guides/setup.md"), "/docs/guides/setup");
        assert_eq!(page_url("/docs", "index.md"), "/docs");
    }

    #[test]
    fn test_set_children_picks_index_file() {
        let mut tree = NavigationTree::new();
        let folder = tree.push(Node::new(NodeKind::Folder, "Guides", "guides", "guides"));
        let a = page(&mut tree, "guides/a.md");
        let index = page(&mut tree, "guides/index.md");

        tree.set_children(folder, vec![a, index]);

        assert_eq!(tree.index(folder), Some(index));
        assert_eq!(tree.navigation_items(folder), &[a]);
        assert_eq!(tree.parent(index), Some(folder));
        assert_eq!(tree.parent(a), Some(folder));
        assert_eq!(tree.node(a).navigation_index, 0);
    }

    #[test]
    fn test_set_children_falls_back_to_first_leaf() {
        let mut tree = NavigationTree::new();
        let folder = tree.push(Node::new(NodeKind::Folder, "Guides", "guides", "guides"));
        let link = tree.push(Node::new(
            NodeKind::CrossLink,
            "Kibana",
            "kibana://",
            "kibana://",
        ));
        let a = page(&mut tree, "guides/a.md");
        let b = page(&mut tree, "guides/b.md");

        tree.set_children(folder, vec![link, a, b]);

        assert_eq!(tree.index(folder), Some(a));
        assert_eq!(tree.navigation_items(folder), &[link, b]);
        assert_eq!(tree.node(b).navigation_index, 1);
    }

    #[test]
    fn test_virtual_file_keeps_children_with_index_first() {
        let mut tree = NavigationTree::new();
        let file = tree.push(Node::new(
            NodeKind::VirtualFile,
            "Intro",
            "intro.md",
            "intro.md",
        ));
        let a = page(&mut tree, "a.md");
        let index = page(&mut tree, "index.md");

        tree.set_children(file, vec![a, index]);

        assert_eq!(tree.index(file), None);
        assert_eq!(tree.navigation_items(file), &[index, a]);
    }

    #[test]
    fn test_urls_follow_owning_root_prefix() {
        let mut tree = NavigationTree::new();
        let set = tree.push(Node::new(NodeKind::DocumentationSet, "Guide", "", ""));
        let home = page(&mut tree, "index.md");
        let toc = tree.push(Node::new(
            NodeKind::TableOfContents,
            "Reference",
            "reference",
            "reference",
        ));
        let api = tree.push(Node::new(NodeKind::File, "API", "reference/api.md", "api.md"));
        tree.set_children(toc, vec![api]);
        tree.set_children(set, vec![home, toc]);

        assert_eq!(tree.url(set), "/");
        assert_eq!(tree.url(api), "/reference/api");
        assert_eq!(tree.url(toc), "/reference/api");

        tree.set_prefix(set, "/guide".to_owned());
        assert_eq!(tree.url(api), "/guide/reference/api");

        tree.set_prefix(toc, "/ref".to_owned());
        assert_eq!(tree.url(api), "/ref/api");
        assert_eq!(tree.url(home), "/guide");
    }

    #[test]
    fn test_depth_and_owning_root() {
        let mut tree = NavigationTree::new();
        let set = tree.push(Node::new(NodeKind::DocumentationSet, "Guide", "", ""));
        let folder = tree.push(Node::new(NodeKind::Folder, "Guides", "guides", "guides"));
        let a = page(&mut tree, "guides/a.md");
        let b = page(&mut tree, "guides/b.md");
        tree.set_children(folder, vec![a, b]);
        tree.set_children(set, vec![folder]);

        assert_eq!(tree.depth(set), 0);
        assert_eq!(tree.depth(b), 2);
        assert_eq!(tree.owning_root(b), Some(set));
        assert_eq!(tree.owning_root(set), None);
    }

    #[test]
    fn test_absorb_shifts_ids() {
        let mut first = NavigationTree::new();
        page(&mut first, "a.md");

        let mut second = NavigationTree::new();
        let folder = second.push(Node::new(NodeKind::Folder, "F", "f", "f"));
        let child = page(&mut second, "f/b.md");
        let other = page(&mut second, "f/c.md");
        second.set_children(folder, vec![child, other]);

        let offset = first.absorb(second);

        let folder = folder.shifted(offset);
        assert_eq!(offset, 1);
        assert_eq!(first.len(), 4);
        assert_eq!(first.index(folder), Some(child.shifted(offset)));
        assert_eq!(first.parent(other.shifted(offset)), Some(folder));
    }

    #[test]
    fn test_detach_renumbers_siblings() {
        let mut tree = NavigationTree::new();
        let folder = tree.push(Node::new(NodeKind::Folder, "Api", "api", "api"));
        let index = page(&mut tree, "api/index.md");
        let v1 = tree.push(Node::new(NodeKind::TableOfContents, "V1", "api/v1", "api/v1"));
        let v2 = page(&mut tree, "api/v2.md");
        tree.set_children(folder, vec![index, v1, v2]);
        assert!(tree.is_attached(v1));

        tree.detach(v1);

        assert_eq!(tree.navigation_items(folder), &[v2]);
        assert_eq!(tree.node(v2).navigation_index, 0);
        assert_eq!(tree.parent(v1), None);
        assert!(!tree.is_attached(v1));
        assert!(tree.is_attached(index));

        tree.set_parent(v1, Some(folder));
        assert!(!tree.is_attached(v1));
    }

    #[test]
    fn test_nav_items_skip_hidden() {
        let mut tree = NavigationTree::new();
        let set = tree.push(Node::new(NodeKind::DocumentationSet, "Guide", "", ""));
        let index = page(&mut tree, "index.md");
        let a = page(&mut tree, "a.md");
        let hidden = page(&mut tree, "hidden.md");
        tree.node_mut(hidden).hidden = true;
        tree.set_children(set, vec![index, a, hidden]);

        let items = tree.nav_items(set);

        assert_eq!(
            items,
            vec![NavItem {
                title: "a.md".to_owned(),
                url: "/a".to_owned(),
                children: vec![],
            }]
        );
        let json = serde_json::to_value(&items).unwrap();
        assert_eq!(json, serde_json::json!([{"title": "a.md", "url": "/a"}]));
    }
}
