//! Forward-slash path helpers.
//!
//! Documentation paths (`guides/setup.md`, `reference/api`) always use `/`
//! regardless of the host OS. These helpers convert between [`Path`] values
//! on disk and documentation-relative strings.

use std::path::{Component, Path, PathBuf};

/// Convert a path to a string using `/` as separator.
pub fn to_forward_slashes(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::CurDir => {}
            Component::ParentDir | Component::Normal(_) => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&component.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

/// Lexically normalize a path, resolving `.` and `..` components.
///
/// Does not touch the file system, so symlinks are not followed.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path of `path` relative to `base`, with forward slashes.
///
/// Returns `""` when both are the same directory and climbs with `..` when
/// `path` is not below `base`. Both paths are normalized lexically first.
pub fn relative_to(base: &Path, path: &Path) -> String {
    let base = normalize(base);
    let path = normalize(path);
    if let Ok(rel) = path.strip_prefix(&base) {
        return to_forward_slashes(rel);
    }

    let base_parts: Vec<_> = base.components().collect();
    let path_parts: Vec<_> = path.components().collect();
    let common = base_parts
        .iter()
        .zip(&path_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return to_forward_slashes(&path);
    }

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &path_parts[common..] {
        rel.push(part.as_os_str());
    }
    to_forward_slashes(&rel)
}

/// Join two documentation path segments with `/`.
///
/// An empty `parent` yields `child` unchanged.
pub fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_owned()
    } else {
        format!("{parent}/{child}")
    }
}

/// Directory part of a documentation path (`a/b/c.md` -> `a/b`, `c.md` -> ``).
pub fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Last segment of a documentation path (`a/b/c.md` -> `c.md`).
pub fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Strip the container path plus one separator from `full`.
///
/// An empty `container` returns `full`. Returns `None` when `container` is not
/// an exact directory prefix of `full`.
pub fn strip_container<'a>(full: &'a str, container: &str) -> Option<&'a str> {
    if container.is_empty() {
        return Some(full);
    }
    full.strip_prefix(container)?.strip_prefix('/')
}
