//! Detection rule scanning for rule overview entries.

use std::path::{Path, PathBuf};

use docset_storage::FileSystem;
use docset_storage::paths::relative_to;

use crate::item::{FileKind, FileRef, TocItem};

/// Produces the generated children of a rule overview entry.
pub trait RuleScanner: Send + Sync {
    /// Scan `rule_dirs` and return one item per rule.
    ///
    /// Returned items carry documentation-relative paths (relative to
    /// `base_dir`) in both path fields and `context` as their declaring file.
    fn scan(
        &self,
        fs: &dyn FileSystem,
        rule_dirs: &[PathBuf],
        base_dir: &Path,
        context: &str,
    ) -> Vec<TocItem>;
}

/// Scanner that lists `*.toml` rule files recursively, sorted by path.
#[derive(Clone, Copy, Debug, Default)]
pub struct TomlRuleScanner;

impl RuleScanner for TomlRuleScanner {
    fn scan(
        &self,
        fs: &dyn FileSystem,
        rule_dirs: &[PathBuf],
        base_dir: &Path,
        context: &str,
    ) -> Vec<TocItem> {
        let mut items = Vec::new();
        for dir in rule_dirs {
            if !fs.dir_exists(dir) {
                tracing::debug!(dir = %dir.display(), "Detection rule folder does not exist");
                continue;
            }
            let mut rules = match fs.list_files_recursive(dir, "*.toml") {
                Ok(rules) => rules,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Failed to list detection rules");
                    continue;
                }
            };
            rules.sort();
            tracing::trace!(dir = %dir.display(), count = rules.len(), "Scanned detection rules");

            items.extend(rules.iter().map(|rule| {
                let path = relative_to(base_dir, &dir.join(rule));
                let mut file = FileRef::declared(path, FileKind::Page, false, Vec::new());
                context.clone_into(&mut file.context);
                TocItem::File(file)
            }));
        }
        items
    }
}
