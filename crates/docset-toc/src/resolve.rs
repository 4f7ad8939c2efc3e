//! Table of contents resolution.
//!
//! Resolution walks a decoded tree top-down and returns a new tree in which
//! every item carries its final documentation-relative path, its path relative
//! to the declaring `docset.yml` / `toc.yml`, and that file as its context.
//! Nested `toc.yml` files are loaded and spliced in, folders without explicit
//! children list their Markdown files, and structural problems are reported
//! to the diagnostics collector instead of aborting.
//!
//! Three pieces of state flow down the recursion:
//!
//! - the *parent path*, which prefixes simple names (`file: setup.md`)
//! - the *container path*, the full path of the nearest `toc.yml` directory
//! - the *context*, the YAML file that declared the current entries

use std::path::{Path, PathBuf};

use docset_config::{Config, SuppressionRule};
use docset_diagnostics::{DiagnosticsCollector, HintType, Suppressions};
use docset_storage::FileSystem;
use docset_storage::paths::{
    file_name, join, normalize, parent_dir, relative_to, strip_container, to_forward_slashes,
};

use crate::file::{TOC_FILE_NAME, TableOfContentsFile};
use crate::item::{
    CrossLinkRef, FileKind, FileRef, FolderRef, INDEX_FILE_NAME, RuleOverviewRef, TocItem, TocRef,
};
use crate::rules::{RuleScanner, TomlRuleScanner};

/// Caller-supplied resolver settings.
#[derive(Clone, Debug, Default)]
pub struct ResolverOptions {
    /// Extra hint suppressions for TOC files whose path matches a rule.
    pub suppress: Vec<SuppressionRule>,
}

impl From<&Config> for ResolverOptions {
    fn from(config: &Config) -> Self {
        Self {
            suppress: config.resolver.suppress.clone(),
        }
    }
}

/// Resolves decoded TOC entries against a documentation source directory.
pub struct Resolver<'a> {
    collector: &'a dyn DiagnosticsCollector,
    fs: &'a dyn FileSystem,
    base_dir: &'a Path,
    options: &'a ResolverOptions,
    rule_scanner: &'a dyn RuleScanner,
}

#[derive(Clone, Copy)]
struct Scope<'s> {
    parent_path: &'s str,
    container_path: &'s str,
    context: &'s str,
    suppress: &'s Suppressions,
}

impl<'a> Resolver<'a> {
    /// Create a resolver rooted at `base_dir`, the documentation source directory.
    pub fn new(
        collector: &'a dyn DiagnosticsCollector,
        fs: &'a dyn FileSystem,
        base_dir: &'a Path,
        options: &'a ResolverOptions,
    ) -> Self {
        Self {
            collector,
            fs,
            base_dir,
            options,
            rule_scanner: &TomlRuleScanner,
        }
    }

    /// Use a different scanner for rule overview entries.
    #[must_use]
    pub fn with_rule_scanner(mut self, rule_scanner: &'a dyn RuleScanner) -> Self {
        self.rule_scanner = rule_scanner;
        self
    }

    /// Suppressions for a TOC file: its own `suppress:` list plus every
    /// configured rule matching `toc_path`.
    pub fn suppressions_for(&self, toc_path: &str, declared: &Suppressions) -> Suppressions {
        let mut suppress = declared.clone();
        for rule in self.options.suppress.iter().filter(|r| r.matches(toc_path)) {
            suppress.extend(rule.hints.iter().copied());
        }
        suppress
    }

    /// Resolve top-level entries declared in `context`.
    pub fn resolve(
        &self,
        items: &[TocItem],
        context: &str,
        suppress: &Suppressions,
    ) -> Vec<TocItem> {
        self.resolve_items(
            items,
            Scope {
                parent_path: "",
                container_path: "",
                context,
                suppress,
            },
        )
    }

    fn resolve_items(&self, items: &[TocItem], scope: Scope<'_>) -> Vec<TocItem> {
        items
            .iter()
            .filter_map(|item| self.resolve_item(item, scope))
            .collect()
    }

    fn resolve_item(&self, item: &TocItem, scope: Scope<'_>) -> Option<TocItem> {
        match item {
            TocItem::IsolatedToc(toc) => self.resolve_toc(toc, scope),
            TocItem::RuleOverview(overview) => Some(self.resolve_rule_overview(overview, scope)),
            TocItem::File(file) => Some(self.resolve_file(file, scope)),
            TocItem::Folder(folder) => Some(self.resolve_folder(folder, scope)),
            TocItem::CrossLink(link) => Some(self.resolve_cross_link(link, scope)),
        }
    }

    /// Full path of a folder, nested TOC or rule overview.
    ///
    /// A declared path containing `/` is relative to the directory of the
    /// declaring file; a simple name nests under the parent path.
    fn located_path(&self, declared: &str, scope: Scope<'_>) -> String {
        if declared.contains('/') {
            let context_dir = Path::new(scope.context).parent().unwrap_or(Path::new(""));
            join(&relative_to(self.base_dir, context_dir), declared)
        } else {
            join(scope.parent_path, declared)
        }
    }

    fn resolve_toc(&self, toc: &TocRef, scope: Scope<'_>) -> Option<TocItem> {
        let full = self.located_path(&toc.path, scope);

        if !toc.children.is_empty() {
            self.collector.emit_error(
                scope.context,
                &format!(
                    "TableOfContents '{full}' may not contain children, define children in '{full}/{TOC_FILE_NAME}' instead."
                ),
            );
            return None;
        }

        let relative = container_relative(&full, scope.container_path);
        let toc_file = normalize(&self.base_dir.join(&full).join(TOC_FILE_NAME));
        let toc_context = to_forward_slashes(&toc_file);

        let Some(nested) = self.load_nested(&toc_file, &toc_context, &full, scope) else {
            return Some(TocItem::IsolatedToc(TocRef {
                path: full,
                path_relative_to_container: relative,
                children: Vec::new(),
                context: scope.context.to_owned(),
            }));
        };

        let suppress = self.suppressions_for(&toc_context, &nested.suppress);
        tracing::debug!(toc = %full, file = %toc_context, "Resolving nested table of contents");
        let children = self.resolve_items(
            &nested.toc,
            Scope {
                parent_path: &full,
                container_path: &full,
                context: &toc_context,
                suppress: &suppress,
            },
        );

        if children.is_empty() {
            self.collector.emit_error(
                &toc_context,
                &format!("Table of contents '{full}' has no children defined"),
            );
        }

        Some(TocItem::IsolatedToc(TocRef {
            path: full,
            path_relative_to_container: relative,
            children,
            context: scope.context.to_owned(),
        }))
    }

    /// Read and parse a nested `toc.yml`, reporting failures as errors.
    fn load_nested(
        &self,
        toc_file: &Path,
        toc_context: &str,
        full: &str,
        scope: Scope<'_>,
    ) -> Option<TableOfContentsFile> {
        if !self.fs.file_exists(toc_file) {
            self.collector.emit_error(
                scope.context,
                &format!("Table of contents file not found: {full}/{TOC_FILE_NAME}"),
            );
            return None;
        }

        let yaml = match self.fs.read_to_string(toc_file) {
            Ok(yaml) => yaml,
            Err(e) => {
                self.collector.emit_error(
                    scope.context,
                    &format!("Failed to read table of contents file {full}/{TOC_FILE_NAME}: {e}"),
                );
                return None;
            }
        };

        match TableOfContentsFile::from_yaml(&yaml) {
            Ok(nested) => Some(nested),
            Err(e) => {
                self.collector.emit_error(
                    toc_context,
                    &format!("Failed to parse table of contents file {full}/{TOC_FILE_NAME}: {e}"),
                );
                None
            }
        }
    }

    fn resolve_file(&self, file: &FileRef, scope: Scope<'_>) -> TocItem {
        let full = join(scope.parent_path, &file.path);

        if file.kind == FileKind::FolderIndex {
            self.validate_folder_index(file, scope);
        }

        let relative = container_relative(&full, scope.container_path);

        let children = if file.children.is_empty() {
            Vec::new()
        } else {
            if file.path.contains('/')
                && file.kind != FileKind::FolderIndex
                && !scope.suppress.should_suppress(HintType::DeepLinkingVirtualFile)
            {
                self.collector.emit_hint(
                    scope.context,
                    &format!(
                        "File '{}' uses deep-linking with children. Consider using 'folder' instead of 'file' for better navigation structure. Virtual files are primarily intended to group sibling files together.",
                        file.path
                    ),
                );
            }

            // A file nested in a folder or TOC doesn't move its children into
            // its own sub-path.
            let parent_path = if file.kind == FileKind::FolderIndex
                || scope.parent_path.is_empty()
            {
                parent_dir(&full)
            } else {
                scope.parent_path
            };
            self.resolve_items(
                &file.children,
                Scope {
                    parent_path,
                    ..scope
                },
            )
        };

        TocItem::File(FileRef {
            path: full,
            path_relative_to_container: relative,
            kind: file.kind,
            hidden: file.hidden,
            children,
            context: scope.context.to_owned(),
        })
    }

    fn validate_folder_index(&self, file: &FileRef, scope: Scope<'_>) {
        let name = file.path.as_str();
        if name.contains('/') {
            self.collector.emit_error(
                scope.context,
                &format!(
                    "Deep linking on folder 'file' is not supported. Found file path '{name}' with '/'. Use simple file name only."
                ),
            );
        }

        if scope.parent_path.is_empty()
            || name == INDEX_FILE_NAME
            || scope.suppress.should_suppress(HintType::FolderFileNameMismatch)
        {
            return;
        }

        let folder = file_name(scope.parent_path);
        if comparable_name(&name.replace(".md", "")) != comparable_name(folder) {
            self.collector.emit_hint(
                scope.context,
                &format!(
                    "File name '{name}' does not match folder name '{folder}'. Best practice is to name the file the same as the folder (e.g., 'folder: {folder}, file: {folder}.md')."
                ),
            );
        }
    }

    fn resolve_folder(&self, folder: &FolderRef, scope: Scope<'_>) -> TocItem {
        let full = self.located_path(&folder.path, scope);
        let relative = container_relative(&full, scope.container_path);

        let discovered;
        let declared = if folder.children.is_empty() {
            discovered = discover_markdown(self.fs, &self.base_dir.join(&full));
            &discovered
        } else {
            &folder.children
        };
        let children = self.resolve_items(
            declared,
            Scope {
                parent_path: &full,
                ..scope
            },
        );

        TocItem::Folder(FolderRef {
            path: full,
            path_relative_to_container: relative,
            children,
            context: scope.context.to_owned(),
        })
    }

    fn resolve_rule_overview(&self, overview: &RuleOverviewRef, scope: Scope<'_>) -> TocItem {
        let full = self.located_path(&overview.path, scope);
        let relative = container_relative(&full, scope.container_path);
        let overview_dir = parent_dir(&full);

        // Declared children are siblings of the overview page, like the
        // generated rules.
        let mut children = self.resolve_items(
            &overview.children,
            Scope {
                parent_path: overview_dir,
                ..scope
            },
        );

        let source_dir = self.base_dir.join(overview_dir);
        let rule_dirs: Vec<PathBuf> = overview
            .rule_folders
            .iter()
            .map(|folder| normalize(&source_dir.join(folder)))
            .collect();
        let generated = self
            .rule_scanner
            .scan(self.fs, &rule_dirs, self.base_dir, scope.context);
        children.extend(
            generated
                .into_iter()
                .map(|item| rebase_container(item, scope.container_path)),
        );

        TocItem::RuleOverview(RuleOverviewRef {
            path: full,
            path_relative_to_container: relative,
            rule_folders: overview.rule_folders.clone(),
            children,
            context: scope.context.to_owned(),
        })
    }

    fn resolve_cross_link(&self, link: &CrossLinkRef, scope: Scope<'_>) -> TocItem {
        TocItem::CrossLink(CrossLinkRef {
            uri: link.uri.clone(),
            title: link.title.clone(),
            hidden: link.hidden,
            children: self.resolve_items(&link.children, scope),
            context: scope.context.to_owned(),
        })
    }
}

/// `full` with the container path and one separator stripped.
fn container_relative(full: &str, container: &str) -> String {
    if let Some(relative) = strip_container(full, container) {
        return relative.to_owned();
    }
    tracing::warn!(
        path = %full,
        container = %container,
        "Path is outside its container, keeping full path"
    );
    full.to_owned()
}

/// Give a generated item a container-relative path.
fn rebase_container(item: TocItem, container: &str) -> TocItem {
    match item {
        TocItem::File(mut file) => {
            file.path_relative_to_container = container_relative(&file.path, container);
            TocItem::File(file)
        }
        other => other,
    }
}

/// Lowercased name with `-` and `_` removed, so `getting-started` matches
/// `GettingStarted` and `getting_started`.
fn comparable_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Unresolved entries for the Markdown files directly inside `dir`.
///
/// `index.md` comes first, the rest follow in name order. Names starting with
/// `_` or `.` are skipped. A missing directory has no entries.
fn discover_markdown(fs: &dyn FileSystem, dir: &Path) -> Vec<TocItem> {
    if !fs.dir_exists(dir) {
        return Vec::new();
    }

    let mut names = match fs.list_files(dir, "*.md") {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to list folder");
            return Vec::new();
        }
    };
    names.retain(|name| !name.starts_with('_') && !name.starts_with('.'));
    names.sort();
    tracing::trace!(dir = %dir.display(), files = ?names, "Auto-discovered folder files");

    let (index, pages): (Vec<_>, Vec<_>) = names
        .into_iter()
        .partition(|name| name.eq_ignore_ascii_case(INDEX_FILE_NAME));

    index
        .into_iter()
        .take(1)
        .map(|name| FileRef::declared(name, FileKind::Index, false, Vec::new()))
        .chain(
            pages
                .into_iter()
                .map(|name| FileRef::declared(name, FileKind::Page, false, Vec::new())),
        )
        .map(TocItem::File)
        .collect()
}

#[cfg(test)]
mod tests {
    use docset_diagnostics::{Collector, Severity};
    use docset_storage::MockFileSystem;
    use pretty_assertions::assert_eq;

    use super::*;

    const CONTEXT: &str = "/docs/docset.yml";

    fn resolve_with(
        fs: &MockFileSystem,
        options: &ResolverOptions,
        items: &[TocItem],
        suppress: &Suppressions,
    ) -> (Vec<TocItem>, Collector) {
        let collector = Collector::new();
        let resolved = Resolver::new(&collector, fs, Path::new("/docs"), options)
            .resolve(items, CONTEXT, suppress);
        (resolved, collector)
    }

    fn resolve(fs: &MockFileSystem, items: &[TocItem]) -> (Vec<TocItem>, Collector) {
        resolve_with(fs, &ResolverOptions::default(), items, &Suppressions::new())
    }

    fn file(path: &str, children: Vec<TocItem>) -> TocItem {
        TocItem::File(FileRef::declared(path, FileRef::kind_for(path), false, children))
    }

    fn paths(items: &[TocItem]) -> Vec<&str> {
        items.iter().map(TocItem::path_relative_to_docset).collect()
    }

    #[test]
    fn test_top_level_file_paths() {
        let fs = MockFileSystem::new();

        let (resolved, collector) = resolve(&fs, &[file("index.md", vec![])]);

        assert_eq!(
            resolved,
            vec![TocItem::File(FileRef {
                path: "index.md".to_owned(),
                path_relative_to_container: "index.md".to_owned(),
                kind: FileKind::Index,
                hidden: false,
                children: vec![],
                context: CONTEXT.to_owned(),
            })]
        );
        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn test_resolution_does_not_touch_input() {
        let fs = MockFileSystem::new();
        let input = vec![file("a.md", vec![])];
        let before = input.clone();

        let _ = resolve(&fs, &input);

        assert_eq!(input, before);
    }

    #[test]
    fn test_top_level_file_children_resolve_in_its_directory() {
        let fs = MockFileSystem::new();

        let (resolved, collector) =
            resolve(&fs, &[file("nest/guide.md", vec![file("child.md", vec![])])]);

        assert_eq!(paths(resolved[0].children()), vec!["nest/child.md"]);
        assert_eq!(collector.hints(), 1);
    }

    #[test]
    fn test_nested_file_children_keep_parent_path() {
        let fs = MockFileSystem::new();
        let folder = TocItem::Folder(FolderRef::declared(
            "guides",
            vec![file("clients/start.md", vec![file("child.md", vec![])])],
        ));

        let (resolved, _) = resolve(&fs, &[folder]);

        let start = &resolved[0].children()[0];
        assert_eq!(start.path_relative_to_docset(), "guides/clients/start.md");
        assert_eq!(paths(start.children()), vec!["guides/child.md"]);
    }

    #[test]
    fn test_deep_link_hint_suppressed() {
        let fs = MockFileSystem::new();
        let suppress: Suppressions = [HintType::DeepLinkingVirtualFile].into_iter().collect();

        let (_, collector) = resolve_with(
            &fs,
            &ResolverOptions::default(),
            &[file("nest/guide.md", vec![file("child.md", vec![])])],
            &suppress,
        );

        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn test_deep_link_without_children_is_fine() {
        let fs = MockFileSystem::new();

        let (_, collector) = resolve(&fs, &[file("nest/guide.md", vec![])]);

        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn test_folder_index_name_mismatch_hint() {
        let fs = MockFileSystem::new();
        let folder = TocItem::Folder(FolderRef::declared(
            "getting-started",
            vec![TocItem::File(FileRef::declared(
                "overview.md",
                FileKind::FolderIndex,
                false,
                vec![],
            ))],
        ));

        let (_, collector) = resolve(&fs, &[folder]);

        let hints = collector.of_severity(Severity::Hint);
        assert_eq!(hints.len(), 1);
        assert!(hints[0].message.starts_with(
            "File name 'overview.md' does not match folder name 'getting-started'."
        ));
    }

    #[test]
    fn test_folder_index_name_match_ignores_case_and_separators() {
        let fs = MockFileSystem::new();
        let folder = TocItem::Folder(FolderRef::declared(
            "guides/getting-started",
            vec![TocItem::File(FileRef::declared(
                "Getting_Started.md",
                FileKind::FolderIndex,
                false,
                vec![],
            ))],
        ));

        let (_, collector) = resolve(&fs, &[folder]);

        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn test_folder_index_deep_link_is_error() {
        let fs = MockFileSystem::new();
        let folder = TocItem::Folder(FolderRef::declared(
            "api",
            vec![TocItem::File(FileRef::declared(
                "v1/index.md",
                FileKind::FolderIndex,
                false,
                vec![],
            ))],
        ));

        let (_, collector) = resolve(&fs, &[folder]);

        assert_eq!(collector.errors(), 1);
        assert!(collector.diagnostics()[0]
            .message
            .contains("Found file path 'v1/index.md' with '/'"));
    }

    #[test]
    fn test_folder_with_slash_is_relative_to_context_directory() {
        let fs = MockFileSystem::new()
            .with_file(
                "/docs/section/toc.yml",
                "toc:\n  - folder: deep/path\n    children:\n      - file: a.md\n",
            )
            .with_file("/docs/section/deep/path/a.md", "");
        let item = TocItem::IsolatedToc(TocRef::declared("section", vec![]));

        let (resolved, collector) = resolve(&fs, &[item]);

        let folder = &resolved[0].children()[0];
        assert_eq!(folder.path_relative_to_docset(), "section/deep/path");
        assert_eq!(folder.path_relative_to_container(), "deep/path");
        assert_eq!(paths(folder.children()), vec!["section/deep/path/a.md"]);
        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn test_nested_toc_with_declared_children_is_dropped() {
        let fs = MockFileSystem::new().with_file("/docs/api/toc.yml", "toc:\n  - file: a.md\n");
        let item = TocItem::IsolatedToc(TocRef::declared("api", vec![file("b.md", vec![])]));

        let (resolved, collector) = resolve(&fs, &[item]);

        assert!(resolved.is_empty());
        assert_eq!(collector.errors(), 1);
        assert_eq!(
            collector.diagnostics()[0].message,
            "TableOfContents 'api' may not contain children, define children in 'api/toc.yml' instead."
        );
    }

    #[test]
    fn test_empty_nested_toc_is_error() {
        let fs = MockFileSystem::new().with_file("/docs/api/toc.yml", "toc: []\n");

        let (resolved, collector) =
            resolve(&fs, &[TocItem::IsolatedToc(TocRef::declared("api", vec![]))]);

        assert_eq!(resolved.len(), 1);
        let errors = collector.of_severity(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file, "/docs/api/toc.yml");
        assert_eq!(errors[0].message, "Table of contents 'api' has no children defined");
    }

    #[test]
    fn test_unparseable_nested_toc_is_error_with_stub() {
        let fs = MockFileSystem::new().with_file("/docs/api/toc.yml", "toc: [\n");

        let (resolved, collector) =
            resolve(&fs, &[TocItem::IsolatedToc(TocRef::declared("api", vec![]))]);

        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].children().is_empty());
        assert_eq!(collector.errors(), 1);
    }

    #[test]
    fn test_configured_suppression_applies_to_matching_toc() {
        let fs = MockFileSystem::new().with_file(
            "/docs/solutions/toc.yml",
            "toc:\n  - file: nest/guide.md\n    children:\n      - file: child.md\n",
        );
        let options = ResolverOptions {
            suppress: vec![SuppressionRule {
                path: "docs/Solutions/toc.yml".to_owned(),
                hints: vec![HintType::DeepLinkingVirtualFile],
            }],
        };

        let (_, collector) = resolve_with(
            &fs,
            &options,
            &[TocItem::IsolatedToc(TocRef::declared("solutions", vec![]))],
            &Suppressions::new(),
        );

        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn test_nested_toc_uses_its_own_suppressions() {
        let fs = MockFileSystem::new().with_file(
            "/docs/api/toc.yml",
            "toc:\n  - file: nest/guide.md\n    children:\n      - file: child.md\n",
        );
        let suppress: Suppressions = [HintType::DeepLinkingVirtualFile].into_iter().collect();

        let (_, collector) = resolve_with(
            &fs,
            &ResolverOptions::default(),
            &[TocItem::IsolatedToc(TocRef::declared("api", vec![]))],
            &suppress,
        );

        assert_eq!(collector.hints(), 1);
    }

    #[test]
    fn test_cross_link_children_resolve_in_place() {
        let fs = MockFileSystem::new();
        let link = TocItem::CrossLink(CrossLinkRef {
            uri: url::Url::parse("kibana://index.md").unwrap(),
            title: Some("Kibana".to_owned()),
            hidden: false,
            children: vec![file("a.md", vec![])],
            context: String::new(),
        });
        let folder = TocItem::Folder(FolderRef::declared("guides", vec![link]));

        let (resolved, _) = resolve(&fs, &[folder]);

        let link = &resolved[0].children()[0];
        assert_eq!(link.path_relative_to_docset(), "kibana://index.md");
        assert_eq!(link.context(), CONTEXT);
        assert_eq!(paths(link.children()), vec!["guides/a.md"]);
    }

    #[test]
    fn test_rule_overview_appends_generated_rules() {
        let fs = MockFileSystem::new()
            .with_file("/docs/detections/index.md", "# Rules")
            .with_file("/docs/detections/rules/b.toml", "")
            .with_file("/docs/detections/rules/a.toml", "");
        let overview = TocItem::RuleOverview(RuleOverviewRef::declared(
            "detections/index.md",
            vec!["rules".to_owned()],
            vec![file("about.md", vec![])],
        ));

        let (resolved, _) = resolve(&fs, &[overview]);

        assert_eq!(
            paths(resolved[0].children()),
            vec![
                "detections/about.md",
                "detections/rules/a.toml",
                "detections/rules/b.toml"
            ]
        );
    }

    #[test]
    fn test_rule_overview_children_are_siblings_of_overview_page() {
        let fs = MockFileSystem::new().with_dir("/docs/security");
        let overview = TocItem::RuleOverview(RuleOverviewRef::declared(
            "overview.md",
            vec!["rules".to_owned()],
            vec![file("setup.md", vec![])],
        ));
        let folder = TocItem::Folder(FolderRef::declared("security", vec![overview]));

        let (resolved, _) = resolve(&fs, &[folder]);

        let overview = &resolved[0].children()[0];
        assert_eq!(overview.path_relative_to_docset(), "security/overview.md");
        assert_eq!(
            paths(overview.children()),
            vec!["security/setup.md"]
        );
    }

    #[test]
    fn test_comparable_name() {
        assert_eq!(comparable_name("Getting_Started-Guide"), "gettingstartedguide");
    }

    #[test]
    fn test_container_relative_mismatch_falls_back_to_full() {
        assert_eq!(container_relative("api/a.md", "api"), "a.md");
        assert_eq!(container_relative("other/a.md", "api"), "other/a.md");
    }
}
