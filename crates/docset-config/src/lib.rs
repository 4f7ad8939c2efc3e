//! Build configuration for documentation set navigation.
//!
//! Parses `docset.toml` with serde and provides auto-discovery of the file
//! in parent directories. Every section is optional:
//!
//! ```toml
//! [site]
//! prefix = "/docs"
//! narrative_scheme = "docs-content"
//!
//! [[resolver.suppress]]
//! path = "docs-content/solutions/toc.yml"
//! hints = ["DeepLinkingVirtualFile"]
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `site.prefix`, `site.narrative_scheme` and `resolver.suppress[].path`
//! support `${VAR}` and `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use docset_diagnostics::HintType;
use serde::Deserialize;

use crate::expand::EnvExpander;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docset.toml";

/// Scheme of the narrative documentation repository.
pub const DEFAULT_NARRATIVE_SCHEME: &str = "docs-content";

/// Build configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings used by navigation assembly.
    pub site: SiteConfig,
    /// TOC resolver settings.
    pub resolver: ResolverConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site-wide navigation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL prefix for every page of the assembled site.
    pub prefix: Option<String>,
    /// Scheme whose references don't need an explicit `path_prefix`.
    pub narrative_scheme: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            narrative_scheme: DEFAULT_NARRATIVE_SCHEME.to_owned(),
        }
    }
}

/// TOC resolver settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Hints to silence for nested `toc.yml` files matching a path.
    pub suppress: Vec<SuppressionRule>,
}

/// Hint suppression for nested TOC files whose path contains `path`.
///
/// Matching is a case-insensitive substring test against the full path of the
/// nested `toc.yml`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SuppressionRule {
    /// Path fragment to match.
    pub path: String,
    /// Hints to suppress in matching files.
    #[serde(default = "default_suppressed_hints")]
    pub hints: Vec<HintType>,
}

impl SuppressionRule {
    /// Whether this rule applies to the TOC file at `toc_path`.
    pub fn matches(&self, toc_path: &str) -> bool {
        toc_path
            .to_lowercase()
            .contains(&self.path.to_lowercase())
    }
}

fn default_suppressed_hints() -> Vec<HintType> {
    vec![HintType::DeepLinkingVirtualFile]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.prefix`").
        field: String,
        /// Error message (e.g., "${`SITE_PREFIX`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `docset.toml` in the current directory and its parents, falling
    /// back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Search for `docset.toml` in `start_dir` and its parents.
    pub fn discover(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Parse configuration from TOML text, expanding and validating it.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.narrative_scheme, "site.narrative_scheme")?;
        if self.site.narrative_scheme.contains("://") {
            return Err(ConfigError::Validation(
                "site.narrative_scheme must be a bare scheme name".to_owned(),
            ));
        }

        for (i, rule) in self.resolver.suppress.iter().enumerate() {
            require_non_empty(&rule.path, &format!("resolver.suppress[{i}].path"))?;
            if rule.hints.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "resolver.suppress[{i}].hints cannot be empty"
                )));
            }
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.expand_with(&EnvExpander::from_env())
    }

    fn expand_with<F>(&mut self, env: &EnvExpander<F>) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        env.expand_optional("site.prefix", &mut self.site.prefix)?;
        env.expand("site.narrative_scheme", &mut self.site.narrative_scheme)?;
        for (i, rule) in self.resolver.suppress.iter_mut().enumerate() {
            env.expand(&format!("resolver.suppress[{i}].path"), &mut rule.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.site.prefix, None);
        assert_eq!(config.site.narrative_scheme, "docs-content");
        assert!(config.resolver.suppress.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.site.narrative_scheme, DEFAULT_NARRATIVE_SCHEME);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
prefix = "/docs"
narrative_scheme = "narrative"

[[resolver.suppress]]
path = "solutions/toc.yml"
hints = ["DeepLinkingVirtualFile", "FolderFileNameMismatch"]
"#;
        let config = Config::from_toml(toml).unwrap();

        assert_eq!(config.site.prefix.as_deref(), Some("/docs"));
        assert_eq!(config.site.narrative_scheme, "narrative");
        assert_eq!(
            config.resolver.suppress,
            vec![SuppressionRule {
                path: "solutions/toc.yml".to_owned(),
                hints: vec![
                    HintType::DeepLinkingVirtualFile,
                    HintType::FolderFileNameMismatch
                ],
            }]
        );
    }

    #[test]
    fn test_suppression_rule_defaults_to_deep_linking() {
        let toml = r#"
[[resolver.suppress]]
path = "reference/toc.yml"
"#;
        let config = Config::from_toml(toml).unwrap();

        assert_eq!(
            config.resolver.suppress[0].hints,
            vec![HintType::DeepLinkingVirtualFile]
        );
    }

    #[test]
    fn test_unknown_hint_name_is_parse_error() {
        let toml = r#"
[[resolver.suppress]]
path = "reference/toc.yml"
hints = ["NoSuchHint"]
"#;
        let err = Config::from_toml(toml).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_empty_suppression_path_rejected() {
        let toml = r#"
[[resolver.suppress]]
path = "  "
"#;
        let err = Config::from_toml(toml).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("resolver.suppress[0].path"));
    }

    #[test]
    fn test_empty_hint_list_rejected() {
        let toml = r#"
[[resolver.suppress]]
path = "reference/toc.yml"
hints = []
"#;
        let err = Config::from_toml(toml).unwrap_err();

        assert!(err.to_string().contains("hints cannot be empty"));
    }

    #[test]
    fn test_empty_narrative_scheme_rejected() {
        let err = Config::from_toml("[site]\nnarrative_scheme = \"\"\n").unwrap_err();

        assert!(err.to_string().contains("site.narrative_scheme"));
    }

    #[test]
    fn test_narrative_scheme_with_separator_rejected() {
        let err =
            Config::from_toml("[site]\nnarrative_scheme = \"docs-content://\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_suppression_rule_matches_case_insensitively() {
        let rule = SuppressionRule {
            path: "Solutions/TOC.yml".to_owned(),
            hints: default_suppressed_hints(),
        };

        assert!(rule.matches("/repo/docs/solutions/toc.yml"));
        assert!(!rule.matches("/repo/docs/reference/toc.yml"));
    }

    #[test]
    fn test_env_expansion_covers_every_string_field() {
        let mut config: Config = toml::from_str(
            "\
[site]
prefix = \"/${SITE_ROOT}\"
narrative_scheme = \"${NARRATIVE:-docs-content}\"

[[resolver.suppress]]
path = \"${REPO}/solutions/toc.yml\"
",
        )
        .unwrap();
        let env = EnvExpander::new(|var: &str| match var {
            "SITE_ROOT" => Some("guide".to_owned()),
            "REPO" => Some("docs-content".to_owned()),
            _ => None,
        });

        config.expand_with(&env).unwrap();

        assert_eq!(config.site.prefix.as_deref(), Some("/guide"));
        assert_eq!(config.site.narrative_scheme, "docs-content");
        assert_eq!(config.resolver.suppress[0].path, "docs-content/solutions/toc.yml");
    }

    #[test]
    fn test_env_expansion_error_names_rule_index() {
        let mut config: Config = toml::from_str(
            "[[resolver.suppress]]\npath = \"a\"\n\n[[resolver.suppress]]\npath = \"${MISSING}\"\n",
        )
        .unwrap();

        let err = config.expand_with(&EnvExpander::new(|_: &str| None)).unwrap_err();

        assert!(err.to_string().contains("resolver.suppress[1].path"), "{err}");
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("docset.toml");

        let err = Config::load(Some(&missing)).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_explicit_path_records_location() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docset.toml");
        std::fs::write(&path, "[site]\nprefix = \"/docs\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.site.prefix.as_deref(), Some("/docs"));
    }

    #[test]
    fn test_discover_walks_parents() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("a/docset.toml"), "").unwrap();

        let found = Config::discover(&nested);

        assert_eq!(found, Some(temp.path().join("a/docset.toml")));
    }

    #[test]
    fn test_discover_ignores_directories_named_like_config() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("docset.toml")).unwrap();

        let found = Config::discover(temp.path());

        // Parent directories of the temp dir are not expected to carry one either.
        assert_ne!(found, Some(temp.path().join("docset.toml")));
    }
}
