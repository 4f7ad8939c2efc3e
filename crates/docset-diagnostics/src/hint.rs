//! Suppressible hint kinds.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

/// Kinds of hints a documentation set may opt out of via `suppress:`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum HintType {
    /// A file declares children while using a nested path (`file: a/b.md`).
    DeepLinkingVirtualFile,
    /// A folder's index file name doesn't match the folder name.
    FolderFileNameMismatch,
}

impl fmt::Display for HintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DeepLinkingVirtualFile => "DeepLinkingVirtualFile",
            Self::FolderFileNameMismatch => "FolderFileNameMismatch",
        })
    }
}

/// Set of hint kinds to suppress for one TOC file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Suppressions(HashSet<HintType>);

impl Suppressions {
    /// Empty suppression set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether hints of `hint` kind must not be emitted.
    pub fn should_suppress(&self, hint: HintType) -> bool {
        self.0.contains(&hint)
    }

    /// Add a hint kind to the set.
    pub fn insert(&mut self, hint: HintType) -> bool {
        self.0.insert(hint)
    }

    /// Whether nothing is suppressed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<HintType> for Suppressions {
    fn from_iter<I: IntoIterator<Item = HintType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<HintType> for Suppressions {
    fn extend<I: IntoIterator<Item = HintType>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_suppressions_from_yaml_list() {
        let yaml = "- DeepLinkingVirtualFile\n- FolderFileNameMismatch\n";

        let suppressions: Suppressions = serde_yaml::from_str(yaml).unwrap();

        assert!(suppressions.should_suppress(HintType::DeepLinkingVirtualFile));
        assert!(suppressions.should_suppress(HintType::FolderFileNameMismatch));
    }

    #[test]
    fn test_unknown_hint_type_is_rejected() {
        let result: Result<Suppressions, _> = serde_yaml::from_str("- NotAHint\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_suppresses_nothing() {
        let suppressions = Suppressions::new();

        assert!(suppressions.is_empty());
        assert!(!suppressions.should_suppress(HintType::DeepLinkingVirtualFile));
    }

    #[test]
    fn test_hint_type_display_matches_yaml_name() {
        assert_eq!(
            HintType::DeepLinkingVirtualFile.to_string(),
            "DeepLinkingVirtualFile"
        );
        assert_eq!(
            HintType::FolderFileNameMismatch.to_string(),
            "FolderFileNameMismatch"
        );
    }
}
