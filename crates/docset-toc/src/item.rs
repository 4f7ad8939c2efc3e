//! Table of contents item model.
//!
//! Items come out of the decoder with placeholder paths (the string the author
//! wrote) and an empty context. The resolver never edits them; it builds new
//! items carrying documentation-relative paths, container-relative paths and
//! the declaring file.

use url::Url;

/// Conventional landing page name inside a folder.
pub const INDEX_FILE_NAME: &str = "index.md";

/// One entry of a table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TocItem {
    /// A Markdown file, possibly grouping children as a virtual file.
    File(FileRef),
    /// A directory grouping.
    Folder(FolderRef),
    /// A reference to a nested `toc.yml`.
    IsolatedToc(TocRef),
    /// A reference to content outside the documentation set.
    CrossLink(CrossLinkRef),
    /// A generated overview of detection rules.
    RuleOverview(RuleOverviewRef),
}

/// Role of a file within its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Ordinary page.
    Page,
    /// A file named `index.md`.
    Index,
    /// Index file synthesized from a `folder` + `file` entry.
    FolderIndex,
}

impl FileKind {
    /// Whether this file is a landing page.
    pub fn is_index(self) -> bool {
        matches!(self, Self::Index | Self::FolderIndex)
    }
}

/// Markdown file reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRef {
    /// Path relative to the documentation set root.
    pub path: String,
    /// Path relative to the declaring `docset.yml` / `toc.yml`.
    pub path_relative_to_container: String,
    /// File role.
    pub kind: FileKind,
    /// Excluded from rendered navigation but still built.
    pub hidden: bool,
    /// Child entries.
    pub children: Vec<TocItem>,
    /// Declaring YAML file.
    pub context: String,
}

/// Folder reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderRef {
    /// Path relative to the documentation set root.
    pub path: String,
    /// Path relative to the declaring `docset.yml` / `toc.yml`.
    pub path_relative_to_container: String,
    /// Explicit or auto-discovered child entries.
    pub children: Vec<TocItem>,
    /// Declaring YAML file.
    pub context: String,
}

/// Nested table of contents reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocRef {
    /// Directory holding the nested `toc.yml`, relative to the documentation set root.
    pub path: String,
    /// Path relative to the declaring `docset.yml` / `toc.yml`.
    pub path_relative_to_container: String,
    /// Resolved contents of the nested `toc.yml`.
    pub children: Vec<TocItem>,
    /// File that referenced the nested TOC.
    pub context: String,
}

/// Cross-link to another documentation set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossLinkRef {
    /// Target URI, e.g. `kibana://reference/index.md`.
    pub uri: Url,
    /// Navigation title override.
    pub title: Option<String>,
    /// Excluded from rendered navigation.
    pub hidden: bool,
    /// Child entries.
    pub children: Vec<TocItem>,
    /// Declaring YAML file.
    pub context: String,
}

/// Detection rule overview page plus the rule folders it summarizes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleOverviewRef {
    /// Path of the overview file relative to the documentation set root.
    pub path: String,
    /// Path relative to the declaring `docset.yml` / `toc.yml`.
    pub path_relative_to_container: String,
    /// Rule source folders, relative to the overview file's directory.
    pub rule_folders: Vec<String>,
    /// Explicit children followed by generated rule pages.
    pub children: Vec<TocItem>,
    /// Declaring YAML file.
    pub context: String,
}

impl FileRef {
    /// Unresolved file entry as written in YAML.
    pub fn declared(
        path: impl Into<String>,
        kind: FileKind,
        hidden: bool,
        children: Vec<TocItem>,
    ) -> Self {
        let path = path.into();
        Self {
            path_relative_to_container: path.clone(),
            path,
            kind,
            hidden,
            children,
            context: String::new(),
        }
    }

    /// Kind implied by a declared file name.
    pub fn kind_for(name: &str) -> FileKind {
        if name == INDEX_FILE_NAME {
            FileKind::Index
        } else {
            FileKind::Page
        }
    }
}

impl FolderRef {
    /// Unresolved folder entry as written in YAML.
    pub fn declared(path: impl Into<String>, children: Vec<TocItem>) -> Self {
        let path = path.into();
        Self {
            path_relative_to_container: path.clone(),
            path,
            children,
            context: String::new(),
        }
    }
}

impl TocRef {
    /// Unresolved nested TOC entry as written in YAML.
    pub fn declared(path: impl Into<String>, children: Vec<TocItem>) -> Self {
        let path = path.into();
        Self {
            path_relative_to_container: path.clone(),
            path,
            children,
            context: String::new(),
        }
    }
}

impl RuleOverviewRef {
    /// Unresolved rule overview entry as written in YAML.
    pub fn declared(
        path: impl Into<String>,
        rule_folders: Vec<String>,
        children: Vec<TocItem>,
    ) -> Self {
        let path = path.into();
        Self {
            path_relative_to_container: path.clone(),
            path,
            rule_folders,
            children,
            context: String::new(),
        }
    }
}

impl TocItem {
    /// Path relative to the documentation set root.
    ///
    /// Cross-links echo their URI.
    pub fn path_relative_to_docset(&self) -> &str {
        match self {
            Self::File(f) => &f.path,
            Self::Folder(f) => &f.path,
            Self::IsolatedToc(t) => &t.path,
            Self::CrossLink(c) => c.uri.as_str(),
            Self::RuleOverview(r) => &r.path,
        }
    }

    /// Path relative to the declaring `docset.yml` / `toc.yml`.
    ///
    /// Cross-links echo their URI.
    pub fn path_relative_to_container(&self) -> &str {
        match self {
            Self::File(f) => &f.path_relative_to_container,
            Self::Folder(f) => &f.path_relative_to_container,
            Self::IsolatedToc(t) => &t.path_relative_to_container,
            Self::CrossLink(c) => c.uri.as_str(),
            Self::RuleOverview(r) => &r.path_relative_to_container,
        }
    }

    /// Path of the YAML file that declared this item.
    pub fn context(&self) -> &str {
        match self {
            Self::File(f) => &f.context,
            Self::Folder(f) => &f.context,
            Self::IsolatedToc(t) => &t.context,
            Self::CrossLink(c) => &c.context,
            Self::RuleOverview(r) => &r.context,
        }
    }

    /// Child items in declared order.
    pub fn children(&self) -> &[TocItem] {
        match self {
            Self::File(f) => &f.children,
            Self::Folder(f) => &f.children,
            Self::IsolatedToc(t) => &t.children,
            Self::CrossLink(c) => &c.children,
            Self::RuleOverview(r) => &r.children,
        }
    }

    /// Whether the item is excluded from rendered navigation.
    pub fn is_hidden(&self) -> bool {
        match self {
            Self::File(f) => f.hidden,
            Self::CrossLink(c) => c.hidden,
            Self::Folder(_) | Self::IsolatedToc(_) | Self::RuleOverview(_) => false,
        }
    }

    /// Whether the item is backed by a Markdown page.
    pub fn is_page(&self) -> bool {
        matches!(self, Self::File(_) | Self::RuleOverview(_))
    }

    /// Depth-first, pre-order iterator over this item and its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Depth-first iterator returned by [`TocItem::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a TocItem>,
}

impl<'a> Walk<'a> {
    /// Walk a list of sibling items in order.
    pub fn over(items: &'a [TocItem]) -> Self {
        Self {
            stack: items.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TocItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        self.stack.extend(item.children().iter().rev());
        Some(item)
    }
}
